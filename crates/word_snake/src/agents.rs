//! Building players from command-line agent specs

use ollama_agent::{OllamaAgent, OllamaConfig};
use scripted_agent::ScriptedAgent;
use snake_core::Agent;
use std::time::Duration;

/// Create an agent from a spec string.
///
/// - `scripted:Elephant,Tiger` replays the listed replies
/// - `ollama:llama3:8b` talks to the given Ollama model
/// - anything else is taken as an Ollama model name (tags may contain `:`)
pub fn create_agent(spec: &str, host: &str, timeout: Option<Duration>) -> Box<dyn Agent> {
    let spec = spec.trim();
    if let Some(replies) = spec.strip_prefix("scripted:") {
        return Box::new(ScriptedAgent::from_list(replies));
    }

    let model = spec.strip_prefix("ollama:").unwrap_or(spec);
    Box::new(OllamaAgent::new(
        OllamaConfig::new(model)
            .with_host(host)
            .with_timeout(timeout),
    ))
}
