use crate::error::{Result, SoundbarError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use xmltree::Element;

/// Characters left unescaped in the `cmd` query parameter
const CMD_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Typed parameter value carried by a set command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Sent as `type="str"`
    Text(String),
    /// Sent as `type="dec"`
    Decimal(i64),
}

impl ParamValue {
    /// Wire type tag for this value
    pub fn type_tag(&self) -> &'static str {
        match self {
            ParamValue::Text(_) => "str",
            ParamValue::Decimal(_) => "dec",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Decimal(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Decimal(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Decimal(value.into())
    }
}

impl From<u8> for ParamValue {
    fn from(value: u8) -> Self {
        ParamValue::Decimal(value.into())
    }
}

/// Optional `<p .../>` parameter of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

/// One UIC command fragment
///
/// Renders as `<name>ACTION</name>` followed, for set commands, by
/// `<p type="str|dec" name="PROP" val="VALUE"/>`. Action, name and value are
/// embedded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: String,
    pub param: Option<Param>,
}

impl Command {
    /// Create a read command for the given action
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            param: None,
        }
    }

    /// Attach the parameter of a set command
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.param = Some(Param {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<name>{}</name>", self.action)?;
        if let Some(param) = &self.param {
            write!(
                f,
                r#"<p type="{}" name="{}" val="{}"/>"#,
                param.value.type_tag(),
                param.name,
                param.value
            )?;
        }
        Ok(())
    }
}

/// Percent-encode a command fragment for the `cmd` query parameter
///
/// Spaces become `%20`, never `+`.
pub fn encode_command(command: &str) -> String {
    utf8_percent_encode(command, CMD_ENCODE_SET).to_string()
}

/// Build the full request URL for a command against an endpoint
pub fn command_url(endpoint: &str, command: &str) -> String {
    format!("{}?cmd={}", endpoint, encode_command(command))
}

/// Parsed `<UIC><response>...</response></UIC>` reply
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    response: Element,
}

impl ResponseEnvelope {
    /// Parse a response body
    ///
    /// Fails with [`SoundbarError::Parse`] when the body is not XML and with
    /// [`SoundbarError::MalformedResponse`] when the `UIC`/`response` wrapper
    /// is missing.
    pub fn parse(body: &str) -> Result<Self> {
        let root = Element::parse(body.as_bytes()).map_err(|e| SoundbarError::Parse(e.to_string()))?;

        if root.name != "UIC" {
            return Err(SoundbarError::MalformedResponse(format!(
                "expected root element UIC, found {}",
                root.name
            )));
        }

        let response = root
            .get_child("response")
            .cloned()
            .ok_or_else(|| SoundbarError::MalformedResponse("No response element in UIC".to_string()))?;

        Ok(Self { response })
    }

    /// Text of the named field, `None` if the device did not send it
    ///
    /// An empty element yields `Some("")`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.response.get_child(key).map(|field| {
            field
                .get_text()
                .map(|text| text.trim().to_string())
                .unwrap_or_default()
        })
    }

    /// The `result` attribute of the response element (`ok`, `ng`, ...)
    pub fn result(&self) -> Option<&str> {
        self.response.attributes.get("result").map(String::as_str)
    }
}
