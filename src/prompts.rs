//! Prompt templates for the two diagram endpoints.

use serde_json::Value;

/// System persona for the generator. Fixes the output contract: valid JSON
/// with the category vocabulary the frontend's legend understands.
pub const GENERATOR_SYSTEM_PROMPT: &str = "You are a backend architect generating system diagrams for GoJS visualization. \
     Use valid JSON format. Ensure all components have correct categories such as: \
     'actor', 'service', 'api', 'database', 'queue', 'monitoring', 'external'. \
     Represent inter-service communication and follow modern architecture principles.";

/// Instruction used by the analyzer when the caller asks no question.
pub const DEFAULT_ANALYSIS_INSTRUCTION: &str =
    "Provide a detailed analysis with pros and cons, and suggest potential improvements.";

/// Build the generator's user prompt, embedding the caller's request verbatim.
pub fn generation_prompt(request: &str) -> String {
    format!(
        r#"
Design a modern, cloud-native, and scalable system for the following request:

"{request}"

Include realistic components:
- Modular microservices
- REST/GraphQL APIs
- Kafka or SQS for messaging
- Event queues or topics
- API Gateway / Load Balancer
- Auth mechanisms (OAuth, JWT, etc.)
- Observability (Prometheus, ELK, CloudWatch)
- Admin/Monitoring dashboards
- External integrations (Payment, Identity)
- SQL / NoSQL databases
- Storage layers (S3, GCS)

Return ONLY valid JSON in this format:
{{
  "nodes": [{{ "key": "...", "category": "actor|service|api|database|queue|monitoring|external" }}],
  "links": [{{ "from": "...", "to": "..." }}]
}}

Ensure services interact with one another and data flows make logical sense.
"#
    )
}

/// Build the analyzer's prompt: the serialized diagram followed by either
/// the caller's question or the default instruction.
pub fn analysis_prompt(
    nodes: &[Value],
    links: &[Value],
    question: Option<&str>,
) -> Result<String, serde_json::Error> {
    let nodes_json = serde_json::to_string_pretty(nodes)?;
    let links_json = serde_json::to_string_pretty(links)?;

    let mut prompt = format!(
        "You are a cloud architecture expert. Review the system diagram defined below:\n\
         Nodes: {nodes_json}\n\
         Links: {links_json}\n\n"
    );

    match question {
        Some(question) => prompt.push_str(&format!("Answer this question: {question}")),
        None => prompt.push_str(DEFAULT_ANALYSIS_INSTRUCTION),
    }

    Ok(prompt)
}
