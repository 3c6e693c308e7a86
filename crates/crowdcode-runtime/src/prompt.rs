use crowdcode_github::Issue;

const MISSING_BODY_PLACEHOLDER: &str = "No description provided";

/// Builds the natural-language task prompt handed to the coding agent.
///
/// The issue body is embedded verbatim; the fixed instructions push the agent
/// to produce working code instead of a plan.
pub fn build_implementation_prompt(owner: &str, repo: &str, issue: &Issue) -> String {
    let body = issue
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .unwrap_or(MISSING_BODY_PLACEHOLDER);
    format!(
        "Implement this feature request for the repository:\n\n\
         Repository: {owner}/{repo}\n\
         Issue #{number}: {title}\n\n\
         Description:\n{body}\n\n\
         IMPORTANT:\n\
         - Create new files as needed (the repository may be mostly empty)\n\
         - Implement a complete, working solution\n\
         - Add any necessary dependencies or configuration files\n\
         - Follow best practices for the language/framework you choose\n\
         - Make sure to actually write the code - don't just plan or describe it\n\n\
         Please proceed with the implementation now.",
        number = issue.number,
        title = issue.title,
    )
}
