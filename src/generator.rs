//! Statement generator input validation and prompt construction

use serde::Deserialize;

use crate::error::AppError;

/// Notice shown when a required generation field is missing
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please fill in all required fields (Project Type, Domain, and Goals)";

/// System message sent with every generation request
pub const SYSTEM_PROMPT: &str = "You are an expert project manager with experience in creating \
     detailed project statements.";

/// Raw generation form, straight from the request body
#[derive(Debug, Deserialize)]
pub struct StatementForm {
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub constraints: String,
}

/// Validated generator input
///
/// Optional fields are `None` when left blank and rendered with an
/// explicit placeholder in the prompt.
#[derive(Debug, Clone)]
pub struct StatementInput {
    pub project_type: String,
    pub domain: String,
    pub goals: String,
    pub audience: Option<String>,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub constraints: Option<String>,
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl StatementInput {
    /// Validate a submitted form
    ///
    /// `project_type`, `domain`, and `goals` must be non-blank;
    /// whitespace-only values count as missing.
    pub fn from_form(form: StatementForm) -> Result<Self, AppError> {
        let project_type = form.project_type.trim().to_string();
        let domain = form.domain.trim().to_string();
        let goals = form.goals.trim().to_string();

        if project_type.is_empty() || domain.is_empty() || goals.is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        Ok(StatementInput {
            project_type,
            domain,
            goals,
            audience: optional(form.audience),
            timeline: optional(form.timeline),
            budget: optional(form.budget),
            constraints: optional(form.constraints),
        })
    }

    /// Build the fixed-structure generation prompt
    pub fn prompt(&self) -> String {
        format!(
            r#"You are an expert project strategist.

Here are the initial project details provided (context only, do not simply restate):
Project Type: {project_type}
Domain: {domain}
Goals: {goals}
Target Audience: {audience}
Timeline: {timeline}
Budget: {budget}
Constraints: {constraints}

Your task:
1. Invent new and creative project ideas, opportunities, and directions that build on these details.
2. Suggest approaches the user might not have considered yet.
3. Incorporate innovative methods, technologies, and strategies.
4. Highlight unique ways to network, collaborate, or reach the audience.
5. Keep the tone professional but inspiring.

Output the final result in **pure HTML** with the following structure and tags:

<h2>Project Statement</h2>
<p>...</p>

<h2>Objectives</h2>
<ul><li>...</li></ul>

<h2>Scope</h2>
<ul><li>...</li></ul>

<h2>Deliverables</h2>
<ul><li>...</li></ul>

<h2>Success Metrics</h2>
<ul><li>...</li></ul>

<h2>Tech Stack</h2>
<ul><li>...</li></ul>

<h2>Tech Approach</h2>
<ul><li>...</li></ul>

<h2>Potential Challenges</h2>
<ul><li>...</li></ul>

<h2>Recommended Approach</h2>
<ul><li>...</li></ul>

Rules:
- Generate a solid, professional problem statement including a tech stack.
- Do not repeat the original text exactly.
- Do not include any introduction or explanation outside the HTML tags.
- Every section must contain original suggestions and ideas that expand beyond the given details."#,
            project_type = self.project_type,
            domain = self.domain,
            goals = self.goals,
            audience = self.audience.as_deref().unwrap_or("Not specified"),
            timeline = self.timeline.as_deref().unwrap_or("Not specified"),
            budget = self.budget.as_deref().unwrap_or("Not specified"),
            constraints = self.constraints.as_deref().unwrap_or("None specified"),
        )
    }
}
