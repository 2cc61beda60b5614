use serde::Serialize;

/// Named field values collected from a form, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value for `name`, like `FormData.get`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_first_value_for_repeated_name() {
        let mut data = FormData::default();
        data.append("tag", "rust");
        data.append("tag", "web");

        assert_eq!(data.get("tag"), Some("rust"));
        assert_eq!(data.fields().len(), 2);
        assert_eq!(data.get("missing"), None);
    }
}
