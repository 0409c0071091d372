//! Ordered string rewrite steps applied with a fold.

use regex::Regex;

enum Rewrite {
    Regex {
        regex: Regex,
        replacement: &'static str,
    },
    Func(fn(&str) -> String),
}

/// One named rewrite. A regex step that does not match leaves the input as is.
pub struct Step {
    name: &'static str,
    rewrite: Rewrite,
}

impl Step {
    /// Regex substitution of every match. `replacement` uses `${n}` group syntax.
    ///
    /// Panics on an invalid pattern; steps are built from literals.
    pub fn regex(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            rewrite: Rewrite::Regex {
                regex: Regex::new(pattern).unwrap(),
                replacement,
            },
        }
    }

    pub fn func(name: &'static str, f: fn(&str) -> String) -> Self {
        Self {
            name,
            rewrite: Rewrite::Func(f),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, input: &str) -> String {
        match &self.rewrite {
            Rewrite::Regex { regex, replacement } => {
                regex.replace_all(input, *replacement).into_owned()
            }
            Rewrite::Func(f) => f(input),
        }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

#[derive(Debug)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn apply(&self, input: &str) -> String {
        self.steps
            .iter()
            .fold(input.to_string(), |acc, step| step.apply(&acc))
    }

    /// Applies the steps up to and including `last`. Unknown names apply every step.
    pub fn apply_until(&self, last: &str, input: &str) -> String {
        let end = self
            .steps
            .iter()
            .position(|s| s.name == last)
            .map_or(self.steps.len(), |i| i + 1);
        self.steps[..end]
            .iter()
            .fold(input.to_string(), |acc, step| step.apply(&acc))
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::name).collect()
    }
}
