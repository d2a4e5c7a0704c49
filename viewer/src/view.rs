use common::ViewerConfig;

pub const RUN_LABEL: &str = "Run prediction";
pub const BUSY_LABEL: &str = "Running...";
pub const LOADING_TEXT: &str = "Loading...";

/// The button that starts a prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    pub enabled: bool,
    pub label: String,
}

impl Default for TriggerControl {
    fn default() -> Self {
        TriggerControl {
            enabled: true,
            label: RUN_LABEL.to_string(),
        }
    }
}

impl TriggerControl {
    pub fn set_busy(&mut self) {
        self.enabled = false;
        self.label = BUSY_LABEL.to_string();
    }

    pub fn restore(&mut self) {
        *self = TriggerControl::default();
    }
}

/// Mutually exclusive model choices, at most one selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelOptions {
    options: Vec<String>,
    selected: Option<usize>,
}

impl ModelOptions {
    pub fn new<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ModelOptions {
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selects `value`, appending it as a new option if unknown.
    pub fn select(&mut self, value: &str) {
        let index = match self.options.iter().position(|option| option == value) {
            Some(index) => index,
            None => {
                self.options.push(value.to_string());
                self.options.len() - 1
            }
        };
        self.selected = Some(index);
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }
}

/// Every control and pane the dispatcher and renderer touch, built once at
/// startup and passed around explicitly.
#[derive(Debug)]
pub struct ViewState<S> {
    pub ticker_input: String,
    pub models: ModelOptions,
    pub trigger: TriggerControl,
    pub metrics: String,
    pub payload: String,
    pub chart: S,
    pub default_ticker: String,
    pub default_model: String,
}

impl<S> ViewState<S> {
    pub fn new(config: &ViewerConfig, chart: S) -> Self {
        ViewState {
            ticker_input: String::new(),
            models: ModelOptions::default(),
            trigger: TriggerControl::default(),
            metrics: String::new(),
            payload: String::new(),
            chart,
            default_ticker: config.default_ticker.clone(),
            default_model: config.default_model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_busy_and_restore() {
        let mut trigger = TriggerControl::default();
        trigger.set_busy();
        assert!(!trigger.enabled);
        assert_eq!(trigger.label, BUSY_LABEL);

        trigger.restore();
        assert!(trigger.enabled);
        assert_eq!(trigger.label, RUN_LABEL);
    }

    #[test]
    fn test_model_selection_is_exclusive() {
        let mut models = ModelOptions::new(["xgb", "lstm"]);
        assert_eq!(models.selected(), None);

        models.select("lstm");
        assert_eq!(models.selected(), Some("lstm"));

        models.select("xgb");
        assert_eq!(models.selected(), Some("xgb"));

        models.select("prophet");
        assert_eq!(models.selected(), Some("prophet"));
        assert_eq!(models.options(), ["xgb", "lstm", "prophet"]);
    }
}
