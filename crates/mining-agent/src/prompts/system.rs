//! Persona prompts

/// System prompt of the Mining Analyst
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert mining industry analyst with deep \
knowledge of commodity markets, mining operations, exploration, project development, \
regulation and ESG practices. Provide detailed, data-driven analysis with clear structure, \
cite the key figures and trends you rely on, state your assumptions, and finish with \
actionable recommendations for mining executives and investors.";

/// User message sent by the analyst: the query, prefixed with context when given
pub fn analyst_user_message(query: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("Context: {context}\n\nQuery: {query}"),
        None => query.to_string(),
    }
}
