use std::net::SocketAddr;

use anyhow::Result;
use serde_json::Value;

use tx_dashboard::fixtures::BUILTIN;
use tx_dashboard::server::{AppState, router};

// Binds the dashboard to an ephemeral port and returns its base URL
async fn spawn_dashboard() -> Result<String> {
    let state = AppState::new(BUILTIN.clone()).with_indent_unit(20);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    Ok(format!("http://{addr}"))
}

async fn get_json(url: &str) -> Result<Value> {
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn row_ids(view: &Value) -> Vec<u64> {
    view["rows"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row["id"].as_u64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_calls_endpoint_filters() -> Result<()> {
    let base = spawn_dashboard().await?;

    // (query string, expected ids)
    let cases: [(&str, Vec<u64>); 6] = [
        ("", vec![0, 1, 2]),
        ("?static=false", vec![0]),
        ("?q=fee", vec![2]),
        ("?q=UNISWAP", vec![1, 2]),
        ("?q=uniswap&static=false", vec![]),
        ("?q=uniswap&detail=full", vec![1, 2]),
    ];

    for (query, expected) in cases {
        let view = get_json(&format!("{base}/api/calls{query}")).await?;
        assert_eq!(row_ids(&view), expected, "query {query:?}");
        assert_eq!(view["totalCalls"], 3);
    }
    Ok(())
}

#[tokio::test]
async fn test_calls_endpoint_rows() -> Result<()> {
    let base = spawn_dashboard().await?;

    let view = get_json(&format!("{base}/api/calls?detail=Full&gas=true")).await?;
    assert_eq!(view["detailLevel"], "Full");
    assert_eq!(view["showGasUsed"], true);

    let rows = view["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows[0]["indent"], 0);
    assert_eq!(rows[1]["indent"], 20);
    assert_eq!(rows[1]["kind"], "STATICCALL");
    assert_eq!(rows[1]["function"], "tickSpacing");
    assert_eq!(rows[0]["caller"], "[Sender]");
    Ok(())
}

#[tokio::test]
async fn test_invalid_query_is_rejected() -> Result<()> {
    let base = spawn_dashboard().await?;

    for query in ["detail=verbose", "static=maybe", "gas=2"] {
        let response = reqwest::get(format!("{base}/api/calls?{query}")).await?;
        assert_eq!(response.status().as_u16(), 400, "query {query:?}");
    }

    let response = reqwest::get(format!("{base}/api/state?expanded=x")).await?;
    assert_eq!(response.status().as_u16(), 400);
    Ok(())
}

#[tokio::test]
async fn test_panel_endpoints() -> Result<()> {
    let base = spawn_dashboard().await?;

    let tx = get_json(&format!("{base}/api/transaction")).await?;
    assert_eq!(tx["block"], 21_775_192);
    assert_eq!(tx["sender"], "0xfd29445e0716ae540dd85e2a5748641c070e5e77");

    let gas = get_json(&format!("{base}/api/gas")).await?;
    assert_eq!(gas["totalGas"], "1,806,808");

    let balances = get_json(&format!("{base}/api/balances")).await?;
    assert_eq!(balances.as_array().map(Vec::len), Some(6));

    let state = get_json(&format!("{base}/api/state?expanded=0")).await?;
    assert_eq!(state[0]["expanded"], true);
    assert_eq!(state[0]["changes"].as_array().map(Vec::len), Some(2));

    let flow = get_json(&format!("{base}/api/fund-flow?selected=sender")).await?;
    assert_eq!(flow["selected"], "sender");
    assert_eq!(flow["edges"][0]["dimmed"], false);
    assert_eq!(flow["edges"][1]["dimmed"], true);
    Ok(())
}

#[tokio::test]
async fn test_text_pages() -> Result<()> {
    let base = spawn_dashboard().await?;

    let calls = reqwest::get(format!("{base}/calls?static=false"))
        .await?
        .text()
        .await?;
    assert!(calls.starts_with("Invocation Flow\n"));
    assert!(calls.contains("showing 1 of 3"));
    assert!(!calls.contains("STATICCALL"));

    let page = reqwest::get(format!("{base}/?q=fee")).await?.text().await?;
    assert!(page.contains("Transaction Details [Success]"));
    assert!(page.contains("[2] STATICCALL Uniswap V3: USDC 3.fee (500)"));
    assert!(!page.contains("tickSpacing"));
    Ok(())
}
