use std::fmt;

use crate::form::CustomerForm;

/// Filters for the customer collection, in the order they are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pairs: Vec<(&'static str, String)>,
}

impl SearchQuery {
    /// Builds the query from the non-empty search fields. Names only count
    /// when both first and last name are present.
    pub fn from_form(form: &CustomerForm) -> Self {
        let mut pairs = Vec::new();

        if !form.first_name.is_empty() && !form.last_name.is_empty() {
            pairs.push(("firstname", form.first_name.clone()));
            pairs.push(("lastname", form.last_name.clone()));
        }
        for (key, value) in [
            ("nickname", &form.nickname),
            ("email", &form.email),
            ("birthday", &form.birthday),
        ] {
            if !value.is_empty() {
                pairs.push((key, value.clone()));
            }
        }

        Self { pairs }
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Unencoded `key=value&...` form, for display and logs.
impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
