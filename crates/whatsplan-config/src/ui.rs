use serde::{Deserialize, Serialize};

fn default_chips() -> Vec<String> {
    [
        "Jazz concerts in Chicago this weekend",
        "Comedy shows in New York next Friday",
        "Tech conferences in San Francisco this month",
        "Food festivals in Austin",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Preset example queries
    #[serde(default = "default_chips")]
    pub chips: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            chips: default_chips(),
        }
    }
}

impl UiConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = crate::parse_var(lookup, "OUTPUT_FORMAT").unwrap_or_default();

        // Pipe-separated, blank entries dropped
        let chips = lookup("QUERY_CHIPS")
            .map(|v| {
                v.split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|chips| !chips.is_empty())
            .unwrap_or_else(default_chips);

        Self { format, chips }
    }

    pub fn chip(&self, index: usize) -> Option<&str> {
        self.chips.get(index).map(String::as_str)
    }
}
