mod field;
mod rules;
mod submit;

pub use self::{field::*, rules::*, submit::*};

use crate::api::{Snapshot, SnapshotRequest};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Delete,
    Validate,
    ListByAge,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::Create,
        FormKind::Delete,
        FormKind::Validate,
        FormKind::ListByAge,
    ];

    pub fn fields(self) -> &'static [Field] {
        match self {
            FormKind::Create => &[
                Field::ResourceGroupName,
                Field::SnapshotName,
                Field::DiskId,
                Field::Location,
            ],

            FormKind::Delete | FormKind::Validate => {
                &[Field::ResourceGroupName, Field::SnapshotName]
            }

            FormKind::ListByAge => &[Field::Days],
        }
    }

    /// Name of the shell's tab this form lives on.
    pub fn tab(self) -> &'static str {
        match self {
            FormKind::Create => "create",
            FormKind::Delete => "delete",
            FormKind::Validate => "validate",
            FormKind::ListByAge => "get-by-age",
        }
    }

    pub fn progress_label(self) -> &'static str {
        match self {
            FormKind::Create => "Creating...",
            FormKind::Delete => "Deleting...",
            FormKind::Validate => "Validating...",
            FormKind::ListByAge => "Loading...",
        }
    }

    /// Message reported when the backend failed without saying why.
    pub fn default_error(self) -> &'static str {
        match self {
            FormKind::Create => "An error occurred while creating the snapshot",
            FormKind::Delete => "An error occurred while deleting the snapshot",
            FormKind::Validate => "An error occurred while validating the snapshot",
            FormKind::ListByAge => "An error occurred while retrieving snapshots",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tab())
    }
}

impl FromStr for FormKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tab() == s)
            .ok_or(())
    }
}

/// What a valid form turns into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Create(SnapshotRequest),
    Delete(SnapshotRequest),
    Validate(SnapshotRequest),
    ListByAge { days: u32 },
}

/// State of a single form: its values, validation errors and whatever the
/// last submission brought back.
#[derive(Clone, Debug)]
pub struct Form {
    kind: FormKind,
    values: IndexMap<Field, String>,
    errors: IndexMap<Field, String>,
    loading: bool,
    listing: Option<Listing>,
}

/// Snapshots found by the last list-by-age submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub days: u32,
    pub snapshots: Vec<Snapshot>,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            values: kind
                .fields()
                .iter()
                .map(|&field| (field, String::new()))
                .collect(),
            errors: Default::default(),
            loading: false,
            listing: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Updates a field, clearing its validation error; fields that don't
    /// belong to this form are ignored.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(&field) {
            *slot = value.into();
            self.errors.remove(&field);
        } else {
            log::debug!("Ignoring `{}`, since the {} form has no such field", field, self.kind);
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors
            .iter()
            .map(|(&field, error)| (field, error.as_str()))
    }

    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Checks all the fields, remembering errors for the invalid ones.
    pub fn validate(&mut self) -> Option<Submission> {
        self.errors = self
            .values
            .iter()
            .filter_map(|(&field, value)| Some((field, rule(field).check(value)?)))
            .collect();

        if !self.errors.is_empty() {
            return None;
        }

        let request = || {
            SnapshotRequest::new(
                self.value(Field::ResourceGroupName),
                self.value(Field::SnapshotName),
            )
        };

        let submission = match self.kind {
            FormKind::Create => Submission::Create(
                request().with_source(self.value(Field::DiskId), self.value(Field::Location)),
            ),

            FormKind::Delete => Submission::Delete(request()),
            FormKind::Validate => Submission::Validate(request()),

            FormKind::ListByAge => Submission::ListByAge {
                days: parse_positive_integer(self.value(Field::Days))?,
            },
        };

        Some(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions as pa;
    use test_case::test_case;

    #[test_case("create", Some(FormKind::Create))]
    #[test_case("delete", Some(FormKind::Delete))]
    #[test_case("validate", Some(FormKind::Validate))]
    #[test_case("get-by-age", Some(FormKind::ListByAge))]
    #[test_case("nuke", None)]
    fn from_str(tab: &str, expected: Option<FormKind>) {
        assert_eq!(expected, tab.parse().ok());
    }

    mod validate {
        use super::*;
        use test_case::test_case;

        fn errors(form: &Form) -> Vec<(Field, &str)> {
            form.errors().collect()
        }

        #[test]
        fn given_empty_create_form() {
            let mut form = Form::new(FormKind::Create);

            assert_eq!(None, form.validate());

            pa::assert_eq!(
                vec![
                    (Field::ResourceGroupName, "Resource Group Name is required"),
                    (Field::SnapshotName, "Snapshot Name is required"),
                    (Field::DiskId, "Disk ID is required"),
                    (Field::Location, "Location is required"),
                ],
                errors(&form)
            );
        }

        #[test_case(FormKind::Delete)]
        #[test_case(FormKind::Validate)]
        fn given_empty_two_field_form(kind: FormKind) {
            let mut form = Form::new(kind);

            assert_eq!(None, form.validate());

            pa::assert_eq!(
                vec![
                    (Field::ResourceGroupName, "Resource Group Name is required"),
                    (Field::SnapshotName, "Snapshot Name is required"),
                ],
                errors(&form)
            );
        }

        #[test]
        fn given_empty_list_by_age_form() {
            let mut form = Form::new(FormKind::ListByAge);

            assert_eq!(None, form.validate());

            pa::assert_eq!(
                vec![(
                    Field::Days,
                    "Please enter a valid number of days (greater than 0)"
                )],
                errors(&form)
            );
        }

        #[test]
        fn given_blank_values() {
            let mut form = Form::new(FormKind::Delete);

            form.set(Field::ResourceGroupName, "  ");
            form.set(Field::SnapshotName, "snap-1");

            assert_eq!(None, form.validate());

            pa::assert_eq!(
                vec![(Field::ResourceGroupName, "Resource Group Name is required")],
                errors(&form)
            );
        }

        #[test]
        fn given_valid_create_form() {
            let mut form = Form::new(FormKind::Create);

            form.set(Field::ResourceGroupName, "rg-1");
            form.set(Field::SnapshotName, "snap-1");
            form.set(Field::DiskId, "/disks/os");
            form.set(Field::Location, "westeurope");

            pa::assert_eq!(
                Some(Submission::Create(
                    SnapshotRequest::new("rg-1", "snap-1").with_source("/disks/os", "westeurope")
                )),
                form.validate()
            );

            assert!(errors(&form).is_empty());
        }

        #[test]
        fn given_valid_list_by_age_form() {
            let mut form = Form::new(FormKind::ListByAge);

            form.set(Field::Days, "30");

            pa::assert_eq!(Some(Submission::ListByAge { days: 30 }), form.validate());
        }
    }

    #[test]
    fn set_clears_field_error() {
        let mut form = Form::new(FormKind::Validate);

        form.validate();
        form.set(Field::SnapshotName, "snap-1");

        pa::assert_eq!(
            vec![(Field::ResourceGroupName, "Resource Group Name is required")],
            form.errors().collect::<Vec<_>>()
        );
    }

    #[test]
    fn set_ignores_foreign_fields() {
        let mut form = Form::new(FormKind::Delete);

        form.set(Field::Days, "30");

        assert_eq!("", form.value(Field::Days));
    }

    #[test]
    fn reset() {
        let mut form = Form::new(FormKind::Delete);

        form.set(Field::ResourceGroupName, "rg-1");
        form.set(Field::SnapshotName, "");
        form.validate();
        form.reset();

        assert_eq!("", form.value(Field::ResourceGroupName));
        assert_eq!(0, form.errors().count());
    }
}
