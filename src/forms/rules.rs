use crate::forms::Field;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Check {
    /// Must contain something other than whitespace
    Required,

    /// Must be a whole number greater than zero
    PositiveInteger,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub label: &'static str,
    pub check: Check,
}

/// Validation rules of all the fields any form can have.
pub const RULES: &[Rule] = &[
    Rule {
        field: Field::ResourceGroupName,
        label: "Resource Group Name",
        check: Check::Required,
    },
    Rule {
        field: Field::SnapshotName,
        label: "Snapshot Name",
        check: Check::Required,
    },
    Rule {
        field: Field::DiskId,
        label: "Disk ID",
        check: Check::Required,
    },
    Rule {
        field: Field::Location,
        label: "Location",
        check: Check::Required,
    },
    Rule {
        field: Field::Days,
        label: "Number of Days",
        check: Check::PositiveInteger,
    },
];

pub fn rule(field: Field) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.field == field)
        .unwrap_or_else(|| unreachable!("no validation rule for `{}`", field))
}

impl Rule {
    /// Returns the error message for `value`, if it's not acceptable.
    pub fn check(&self, value: &str) -> Option<String> {
        match self.check {
            Check::Required => {
                if value.trim().is_empty() {
                    Some(format!("{} is required", self.label))
                } else {
                    None
                }
            }

            Check::PositiveInteger => {
                if parse_positive_integer(value).is_some() {
                    None
                } else {
                    Some("Please enter a valid number of days (greater than 0)".into())
                }
            }
        }
    }
}

pub fn parse_positive_integer(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|&value: &u32| value > 0)
}
