//! Troubleshooting flowchart as an explicit transition table.

use std::str::FromStr;

/// Id of the entry step.
pub const START: &str = "start";

/// Whether a step asks a question or lists fixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// The user picks one of the options.
    Decision(&'static [FlowOption]),
    /// Terminal step with suggested fixes; the only way out is starting over.
    Solution(&'static [&'static str]),
}

/// An answer leading to another step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowOption {
    /// Button text.
    pub text: &'static str,
    /// Target step id.
    pub next: &'static str,
}

/// One node of the flowchart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Unique id.
    pub id: &'static str,
    /// Heading.
    pub title: &'static str,
    /// Prompt or introduction.
    pub description: &'static str,
    /// Options or solutions.
    pub kind: StepKind,
}

/// Input that moves the flowchart forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based option index of a decision step.
    Option(usize),
    /// Return to the first question.
    StartOver,
}

impl FromStr for Choice {
    type Err = String;

    /// Parses a one-based option number or `restart` / `start-over`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "restart" | "start-over" | "startover" | "0" => Ok(Self::StartOver),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .map(Self::Option)
                .ok_or_else(|| format!("'{value}' is not an option number or 'restart'")),
        }
    }
}

const START_OPTIONS: [FlowOption; 4] = [
    FlowOption {
        text: "Cannot create account",
        next: "creation-issues",
    },
    FlowOption {
        text: "Cannot log in",
        next: "login-issues",
    },
    FlowOption {
        text: "Forgot username/password",
        next: "recovery-issues",
    },
    FlowOption {
        text: "Account locked",
        next: "lockout-issues",
    },
];

const STEPS: [Step; 5] = [
    Step {
        id: START,
        title: "FSA ID Problem",
        description: "What issue are you experiencing with your FSA ID?",
        kind: StepKind::Decision(&START_OPTIONS),
    },
    Step {
        id: "creation-issues",
        title: "Account Creation Issues",
        description: "Common problems when creating an FSA ID:",
        kind: StepKind::Solution(&[
            "Ensure your name matches your Social Security card exactly",
            "Use a unique email address (not already used for another FSA ID)",
            "Enter SSN without dashes or spaces (123456789)",
            "Choose a strong password with at least 8 characters",
            "Wait 24 hours if you recently created an account",
        ]),
    },
    Step {
        id: "login-issues",
        title: "Login Problems",
        description: "Troubleshooting login issues:",
        kind: StepKind::Solution(&[
            "Check that Caps Lock is off",
            "Clear your browser cache and cookies",
            "Try a different browser or incognito mode",
            "Ensure you're using the correct username (not email)",
            "Wait 15 minutes if you've made multiple failed attempts",
        ]),
    },
    Step {
        id: "recovery-issues",
        title: "Account Recovery",
        description: "To recover your FSA ID:",
        kind: StepKind::Solution(&[
            "Use the \"Forgot Username\" link on the login page",
            "Use the \"Forgot Password\" link if you know your username",
            "Answer your challenge questions correctly",
            "Check your email for recovery instructions",
            "Contact Federal Student Aid if challenge questions don't work",
        ]),
    },
    Step {
        id: "lockout-issues",
        title: "Account Locked",
        description: "If your account is locked:",
        kind: StepKind::Solution(&[
            "Wait 15 minutes before trying again",
            "Use the account recovery process",
            "Contact Federal Student Aid support",
            "Verify your identity with required documents",
            "Consider creating a new FSA ID if recovery fails",
        ]),
    },
];

/// The fixed troubleshooting table.
#[derive(Clone, Copy, Debug, Default)]
pub struct Flowchart;

impl Flowchart {
    /// All steps, entry step first.
    pub fn steps(&self) -> &'static [Step] {
        &STEPS
    }

    /// Looks up a step by id.
    pub fn step(&self, id: &str) -> Option<&'static Step> {
        STEPS.iter().find(|step| step.id == id)
    }

    /// The step reached from `state` with `choice`, or `None` when the move is not allowed.
    pub fn next(&self, state: &str, choice: Choice) -> Option<&'static str> {
        let step = self.step(state)?;
        match (step.kind, choice) {
            (StepKind::Decision(options), Choice::Option(index)) => {
                options.get(index).map(|option| option.next)
            }
            (StepKind::Solution(_), Choice::StartOver) => Some(START),
            _ => None,
        }
    }

    /// Follows `choices` from the entry step, stopping at the first invalid one.
    pub fn walk<I>(&self, choices: I) -> Result<&'static Step, (&'static Step, Choice)>
    where
        I: IntoIterator<Item = Choice>,
    {
        let mut current = START;
        for choice in choices {
            match self.next(current, choice) {
                Some(next) => current = next,
                None => return Err((self.step_or_start(current), choice)),
            }
        }
        Ok(self.step_or_start(current))
    }

    fn step_or_start(&self, id: &str) -> &'static Step {
        self.step(id).unwrap_or(&STEPS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_option_target_exists() {
        let chart = Flowchart;
        for step in chart.steps() {
            if let StepKind::Decision(options) = step.kind {
                for option in options {
                    assert!(chart.step(option.next).is_some(), "{}", option.next);
                }
            }
        }
    }

    #[test]
    fn solution_steps_list_five_fixes() {
        for step in Flowchart.steps().iter().skip(1) {
            match step.kind {
                StepKind::Solution(fixes) => assert_eq!(fixes.len(), 5, "{}", step.id),
                StepKind::Decision(_) => panic!("{} should be a solution", step.id),
            }
        }
    }

    #[test]
    fn transitions() {
        let chart = Flowchart;
        assert_eq!(chart.next(START, Choice::Option(1)), Some("login-issues"));
        assert_eq!(chart.next(START, Choice::Option(4)), None);
        assert_eq!(chart.next(START, Choice::StartOver), None);
        assert_eq!(chart.next("login-issues", Choice::StartOver), Some(START));
        assert_eq!(chart.next("login-issues", Choice::Option(0)), None);
        assert_eq!(chart.next("missing", Choice::StartOver), None);
    }

    #[test]
    fn walk_reports_the_failing_choice() {
        let chart = Flowchart;
        let reached = chart
            .walk(["4", "restart", "3"].map(|c| c.parse::<Choice>().unwrap()))
            .unwrap();
        assert_eq!(reached.id, "recovery-issues");

        let (at, choice) = chart
            .walk([Choice::Option(0), Choice::Option(0)])
            .unwrap_err();
        assert_eq!(at.id, "creation-issues");
        assert_eq!(choice, Choice::Option(0));
    }

    #[test]
    fn parses_choices() {
        assert_eq!("2".parse::<Choice>(), Ok(Choice::Option(1)));
        assert_eq!("Restart".parse::<Choice>(), Ok(Choice::StartOver));
        assert!("x".parse::<Choice>().is_err());
    }
}
