use std::{fs, path::Path};

use alloy_rpc_types_trace::geth::CallFrame;
use anyhow::{Context, Result};
use chrono::DateTime;
use once_cell::sync::Lazy;
use tracing::info;

use crate::models::common::DashboardData;
use crate::models::datasets::balances::{BalanceChange, TokenChange};
use crate::models::datasets::fund_flow::{FlowEdge, FlowKind, FlowNode, FundFlow, NodeRole};
use crate::models::datasets::gas::{GasOperation, GasProfile};
use crate::models::datasets::state::{ContractStateChange, StateChange, StateChangeValue};
use crate::models::datasets::traces::{CallKind, CallRecord};
use crate::models::datasets::transactions::TransactionInfo;
use crate::models::errors::FixtureError;
use crate::trace::{AddressBook, collect_call_records};

const SENDER: &str = "0xfd29445e0716ae540dd85e2a5748641c070e5e77";
const RECEIVER: &str = "0xce21b204cef753cd8888b842baa9fda20cda1954";
const BLOCKSEC_ASSETS: &str = "https://assets.blocksec.com";

/// The transaction served when no fixture file is configured.
pub static BUILTIN: Lazy<DashboardData> = Lazy::new(builtin);

fn builtin() -> DashboardData {
    DashboardData {
        transaction: transaction(),
        fund_flow: fund_flow(),
        gas_profile: gas_profile(),
        state_changes: state_changes(),
        balance_changes: balance_changes(),
        calls: calls(),
    }
}

fn transaction() -> TransactionInfo {
    TransactionInfo {
        status: "Success".to_string(),
        block: 21_775_192,
        timestamp: DateTime::from_timestamp(1_738_696_895, 0).unwrap_or_default(), // 2025-02-04 19:21:35 UTC
        position: 155,
        gas_limit: 5_000_000,
        gas_used: 1_775_708,
        gas_price: "4.539575861 Gwei".to_string(),
        base_fee: "2.827575861 Gwei".to_string(),
        max_priority_fee: "1.512 Gwei".to_string(),
        transaction_fee: "0.007705819572984588 Ether".to_string(),
        sender: SENDER.to_string(),
        receiver: RECEIVER.to_string(),
        value: "3 wei".to_string(),
        tx_type: "2 (EIP-1559)".to_string(),
        event_count: 12,
        internal_txns: 210,
    }
}

fn fund_flow() -> FundFlow {
    let contract = |id: &str, label: &str| FlowNode {
        id: id.to_string(),
        label: label.to_string(),
        address: None,
        role: NodeRole::Contract,
    };
    let interaction = |to: &str| FlowEdge {
        from: "receiver".to_string(),
        to: to.to_string(),
        kind: FlowKind::ContractInteraction,
        amount: None,
    };

    FundFlow {
        nodes: vec![
            FlowNode {
                id: "sender".to_string(),
                label: "Sender".to_string(),
                address: Some(SENDER.to_string()),
                role: NodeRole::Sender,
            },
            FlowNode {
                id: "receiver".to_string(),
                label: "Receiver".to_string(),
                address: Some(RECEIVER.to_string()),
                role: NodeRole::Receiver,
            },
            contract("balancer", "Balancer: Vault"),
            contract("fluid", "FluidDexV1"),
            contract("proxy", "FluidLiquidityProxy"),
        ],
        edges: vec![
            FlowEdge {
                from: "sender".to_string(),
                to: "receiver".to_string(),
                kind: FlowKind::EthTransfer,
                amount: Some("3 wei".to_string()),
            },
            interaction("balancer"),
            interaction("fluid"),
            interaction("proxy"),
        ],
    }
}

fn gas_profile() -> GasProfile {
    let op = |name: &str, gas: u64| GasOperation {
        name: name.to_string(),
        gas,
    };

    GasProfile {
        total_gas: 1_806_808,
        actual_gas_used: 1_775_708,
        executed_gas: 1_785_480,
        operations: vec![
            op("flashLoan", 334_172),
            op("receiveFlashLoan", 280_000),
            op("swapIn", 163_000),
            op("swap", 150_000),
        ],
    }
}

fn state_changes() -> Vec<ContractStateChange> {
    vec![ContractStateChange {
        contract: "FluidLiquidityProxy".to_string(),
        address: "0x52aa899454998be5b000ad077a46bbe360f4e497".to_string(),
        changes: vec![
            StateChange {
                key: "_userBorrowData".to_string(),
                r#type: "mapping(address => mapping(address => uint256))".to_string(),
                value: Some("0x836951eb21f3df98273517b7249dceff270d34bf".to_string()),
                values: None,
            },
            StateChange {
                key: "_totalAmounts".to_string(),
                r#type: "mapping(address => uint256)".to_string(),
                value: None,
                values: Some(vec![
                    StateChangeValue {
                        from: Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string()),
                        to: "122109847355824500122113115268342768686509130318396722688".to_string(),
                    },
                    StateChangeValue {
                        from: Some("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee".to_string()),
                        to: "387940423373955658284102693165266634131090093448267029012".to_string(),
                    },
                ]),
            },
        ],
    }]
}

fn balance_changes() -> Vec<BalanceChange> {
    let token = |token: &str, balance: &str, value_usd: f64, icon: Option<&str>| TokenChange {
        token: token.to_string(),
        balance: balance.to_string(),
        value_usd,
        icon: icon.map(|path| format!("{BLOCKSEC_ASSETS}/{path}")),
    };
    let ether_icon = Some("image/1663669189317-3.png");
    let weth_icon = Some("icon/f1cb2d02c471d545bbc7722daf3277fd852d98e63d118771af7047bd8256c516.png");
    let usdc_icon = Some("icon/0347a86cc07dbd03fdc5db01a4e5ac7e1217f90e0b6e4bb0f75cbcca09160989.png");

    vec![
        BalanceChange {
            address: SENDER.to_string(),
            label: Some("Sender".to_string()),
            changes: vec![token("Ether", "+0.011309549422142913", 31.1, ether_icon)],
        },
        BalanceChange {
            address: RECEIVER.to_string(),
            label: Some("Receiver".to_string()),
            changes: vec![
                token("Wrapped Ether", "+0.000000000000000001", 0.0, weth_icon),
                token("Circle: USD Coin Token (USDC)", "+0.000001", 0.0, usdc_icon),
            ],
        },
        BalanceChange {
            address: "Titan Builder".to_string(),
            label: None,
            changes: vec![token("Ether", "+0.000108000807458785", 0.3, None)],
        },
        BalanceChange {
            address: "FluidLiquidityProxy".to_string(),
            label: None,
            changes: vec![
                token("Ether", "+28.977487625273526672", 79_692.76, None),
                token("Circle: USD Coin Token (USDC)", "-82,897.499925", 82_897.5, None),
            ],
        },
        BalanceChange {
            address: "Uniswap V3: USDC 3".to_string(),
            label: None,
            changes: vec![
                token("Wrapped Ether", "-28.988905179502928571", 79_724.16, None),
                token("Circle: USD Coin Token (USDC)", "+82,897.499924", 82_897.5, None),
            ],
        },
        BalanceChange {
            address: "Wrapped Ether".to_string(),
            label: None,
            changes: vec![
                token("Ether", "-28.98890517950292837", 79_724.16, None),
                token("Wrapped Ether", "+28.98890517950292837", 79_724.16, None),
            ],
        },
    ]
}

fn calls() -> Vec<CallRecord> {
    vec![
        CallRecord::new(0, CallKind::Call, RECEIVER, 0)
            .with_value("0.000000000000000003")
            .with_caller("[Sender]")
            .with_arguments("(raw data)"),
        CallRecord::new(1, CallKind::StaticCall, "Uniswap V3: USDC 3", 1)
            .with_function("tickSpacing")
            .with_result("(10)"),
        CallRecord::new(2, CallKind::StaticCall, "Uniswap V3: USDC 3", 1)
            .with_function("fee")
            .with_result("(500)"),
    ]
}

/// Reads a dashboard fixture from a JSON file.
pub fn load_fixture<P: AsRef<Path>>(path: P) -> Result<DashboardData, FixtureError> {
    let path_str = path.as_ref().to_string_lossy().to_string();
    let contents = fs::read_to_string(&path).map_err(|source| FixtureError::Read {
        path: path_str.clone(),
        source,
    })?;
    let data: DashboardData = serde_json::from_str(&contents).map_err(|source| FixtureError::Parse {
        path: path_str,
        source,
    })?;
    validate_calls(&data.calls)?;
    Ok(data)
}

// The trace collector hands over records in execution order; anything else is
// rejected rather than re-sorted.
pub fn validate_calls(calls: &[CallRecord]) -> Result<(), FixtureError> {
    for pair in calls.windows(2) {
        if pair[1].id <= pair[0].id {
            return Err(FixtureError::OutOfOrderCall {
                id: pair[1].id,
                previous_id: pair[0].id,
            });
        }
    }
    Ok(())
}

/// Reads a `callTracer` frame from a JSON file and flattens it into call records.
pub fn load_trace<P: AsRef<Path>>(path: P, book: &AddressBook) -> Result<Vec<CallRecord>> {
    let contents = fs::read_to_string(&path).context("failed to read trace file")?;
    let frame: CallFrame = serde_json::from_str(&contents).context("failed to parse call tracer JSON")?;
    let records = collect_call_records(frame, book)?;
    info!("Loaded {} call records from {}", records.len(), path.as_ref().to_string_lossy());
    Ok(records)
}

/// Builds the dashboard data according to the configured sources.
pub fn load_dashboard(fixture_path: Option<&str>, trace_path: Option<&str>, book: &AddressBook) -> Result<DashboardData> {
    let mut data = match fixture_path {
        Some(path) => {
            info!("Loading fixture from {}", path);
            load_fixture(path)?
        }
        None => {
            info!("Using built-in fixture");
            BUILTIN.clone()
        }
    };

    if let Some(path) = trace_path {
        data.calls = load_trace(path, book)?;
    }

    Ok(data)
}
