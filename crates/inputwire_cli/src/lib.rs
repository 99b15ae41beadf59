use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inputwire::{Bindings, ElementPolicy, OperationRequest, TemplateOptions, WireValue, parse_parameters, parse_template};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    pub template: PathBuf,
    pub bindings: Option<PathBuf>,
    pub options: TemplateOptions,
    pub pretty: bool,
}

#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub query: PathBuf,
    pub operation_name: Option<String>,
    pub evaluate: EvaluateConfig,
}

impl EvaluateConfig {
    pub fn new(template: PathBuf) -> Self {
        Self {
            template,
            bindings: None,
            options: TemplateOptions::default(),
            pretty: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        if strict {
            self.options.element_policy = ElementPolicy::Reject;
        }
        self
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Evaluate a template file against a bindings file and render the result.
pub fn run_evaluate(config: &EvaluateConfig) -> Result<String> {
    let template = load_document(&config.template)?;
    let bindings = load_bindings(config.bindings.as_deref())?;
    let node = parse_template(&template, &config.options)
        .with_context(|| format!("invalid template {}", config.template.display()))?;
    let value = node.evaluate(&bindings).context("failed to evaluate template")?;
    render(&value, config.pretty)
}

/// Build the JSON body of a request for the operation in `config.query`.
pub fn run_request(config: &RequestConfig) -> Result<String> {
    let query = fs::read_to_string(&config.query)
        .with_context(|| format!("failed to read query {}", config.query.display()))?;
    let template = load_document(&config.evaluate.template)?;
    let bindings = load_bindings(config.evaluate.bindings.as_deref())?;
    let parameters = parse_parameters(&template, &config.evaluate.options)
        .with_context(|| format!("invalid template {}", config.evaluate.template.display()))?;
    let request = OperationRequest::from_parts(
        query.trim_end().to_string(),
        config.operation_name.clone(),
        Some(&parameters),
        &bindings,
    )
    .context("failed to evaluate operation variables")?;
    let body = serde_json::to_value(&request).context("failed to serialize request")?;
    render(&body, config.evaluate.pretty)
}

/// Read a JSON or YAML document; the extension picks the format.
pub fn load_document(path: &Path) -> Result<WireValue> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&text).with_context(|| format!("failed to parse YAML {}", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("failed to parse JSON {}", path.display()))
    }
}

fn load_bindings(path: Option<&Path>) -> Result<Bindings> {
    let Some(path) = path else {
        return Ok(Bindings::new());
    };
    let document = load_document(path)?;
    if !matches!(document, WireValue::Object(_) | WireValue::Null) {
        anyhow::bail!("bindings in {} must be a JSON object", path.display());
    }
    let bindings = Bindings::from_json(document);
    tracing::debug!(count = bindings.len(), "loaded bindings");
    Ok(bindings)
}

fn render(value: &WireValue, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

#[cfg(test)]
mod cli_lib_tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("create file");
        file.write_all(content.as_bytes()).expect("write file");
        path
    }

    #[test]
    fn test_run_evaluate() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_temp(temp.path(), "t.json", r#"{"episode": {"$var": "episode"}, "after": null}"#);
        let bindings = write_temp(temp.path(), "b.json", r#"{"episode": "JEDI"}"#);
        let mut config = EvaluateConfig::new(template);
        config.bindings = Some(bindings);
        assert_eq!(run_evaluate(&config).expect("evaluate"), r#"{"episode":"JEDI"}"#);
    }

    #[test]
    fn test_yaml_template() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_temp(temp.path(), "t.yaml", "first: 10\nafter:\n  $var: after\n");
        let bindings = write_temp(temp.path(), "b.yml", "after: abc\n");
        let mut config = EvaluateConfig::new(template);
        config.bindings = Some(bindings);
        assert_eq!(run_evaluate(&config).expect("evaluate"), r#"{"first":10,"after":"abc"}"#);
    }

    #[test]
    fn test_bindings_must_be_object() {
        let temp = tempfile::tempdir().expect("tempdir");
        let template = write_temp(temp.path(), "t.json", r#"{"a": 1}"#);
        let bindings = write_temp(temp.path(), "b.json", "[1, 2]");
        let mut config = EvaluateConfig::new(template);
        config.bindings = Some(bindings);
        let err = run_evaluate(&config).expect_err("array bindings");
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn test_strict_flag() {
        let config = EvaluateConfig::new(PathBuf::from("t.json")).with_strict(true);
        assert_eq!(config.options.element_policy, ElementPolicy::Reject);
        let config = EvaluateConfig::new(PathBuf::from("t.json")).with_strict(false);
        assert_eq!(config.options.element_policy, ElementPolicy::Skip);
    }
}
