use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::errors::{QueryError, TraceError};

////////////////////////////////////// Call Data ///////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallKind {
    Call,
    StaticCall,
    DelegateCall,
    CallCode,
    Create,
    Create2,
    SelfDestruct,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Call => "CALL",
            CallKind::StaticCall => "STATICCALL",
            CallKind::DelegateCall => "DELEGATECALL",
            CallKind::CallCode => "CALLCODE",
            CallKind::Create => "CREATE",
            CallKind::Create2 => "CREATE2",
            CallKind::SelfDestruct => "SELFDESTRUCT",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Geth reports call types in upper case, but some clients lowercase them
impl FromStr for CallKind {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CALL" => Ok(CallKind::Call),
            "STATICCALL" => Ok(CallKind::StaticCall),
            "DELEGATECALL" => Ok(CallKind::DelegateCall),
            "CALLCODE" => Ok(CallKind::CallCode),
            "CREATE" => Ok(CallKind::Create),
            "CREATE2" => Ok(CallKind::Create2),
            "SELFDESTRUCT" => Ok(CallKind::SelfDestruct),
            _ => Err(TraceError::UnsupportedCallType { typ: s.to_string() }),
        }
    }
}

/// One entry of a transaction's execution trace.
///
/// Records are kept in execution order; `depth` is the call-stack nesting
/// level and is only ever used for indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: u64,
    pub kind: CallKind,
    pub target: String,
    #[serde(default)]
    pub function_name: String, // Empty when calldata was not decoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_transferred: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_display: Option<String>,
    pub depth: u32,
}

impl CallRecord {
    pub fn new(id: u64, kind: CallKind, target: impl Into<String>, depth: u32) -> Self {
        Self {
            id,
            kind,
            target: target.into(),
            function_name: String::new(),
            value_transferred: None,
            caller: None,
            arguments_display: None,
            result_display: None,
            gas_display: None,
            depth,
        }
    }

    pub fn with_function(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = function_name.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value_transferred = Some(value.into());
        self
    }

    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments_display = Some(arguments.into());
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result_display = Some(result.into());
        self
    }

    pub fn with_gas(mut self, gas: impl Into<String>) -> Self {
        self.gas_display = Some(gas.into());
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind == CallKind::StaticCall
    }
}

//////////////////////////////////// Display State /////////////////////////////////////
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailLevel {
    #[default]
    Default,
    Full,
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailLevel::Default => f.write_str("Default"),
            DetailLevel::Full => f.write_str("Full"),
        }
    }
}

impl FromStr for DetailLevel {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(DetailLevel::Default),
            "full" => Ok(DetailLevel::Full),
            _ => Err(QueryError::InvalidDetailLevel {
                value: s.to_string(),
            }),
        }
    }
}

/// Per-view filter state for the invocation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFilter {
    pub text_query: String,
    pub include_static_calls: bool,
    pub detail_level: DetailLevel,
}

impl Default for DisplayFilter {
    fn default() -> Self {
        Self {
            text_query: String::new(),
            include_static_calls: true,
            detail_level: DetailLevel::Default,
        }
    }
}

impl DisplayFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = query.into();
        self
    }

    pub fn with_static_calls(mut self, include: bool) -> Self {
        self.include_static_calls = include;
        self
    }

    pub fn with_detail_level(mut self, level: DetailLevel) -> Self {
        self.detail_level = level;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub show_gas_used: bool,
}
