use std::collections::HashSet;

use crate::error::{Error, Result};

pub type LabelName = String;

pub type LabelValue = String;

/// Reserved label holding the metric identity.
pub const METRIC_NAME_LABEL: &str = "__name__";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    name: LabelName,
    value: LabelValue,
}

impl Label {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_pair(self) -> (LabelName, LabelValue) {
        (self.name, self.value)
    }
}

/// Ordered label set. Label names are unique within a set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn builder() -> LabelsBuilder {
        LabelsBuilder::default()
    }

    /// `__name__` first, then the additional labels in the order given.
    pub fn for_metric(metric_name: &str, additional: &[Label]) -> Result<Self> {
        Self::builder()
            .label(METRIC_NAME_LABEL, metric_name)
            .extend(additional.iter().cloned())
            .build()
    }

    pub fn metric_name(&self) -> Option<&str> {
        self.get(METRIC_NAME_LABEL)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|l| l.name == name).map(|l| l.value())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Labels {
    type Item = Label;
    type IntoIter = std::vec::IntoIter<Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Default)]
pub struct LabelsBuilder {
    labels: Vec<Label>,
}

impl LabelsBuilder {
    pub fn label<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<LabelName>,
        V: Into<LabelValue>,
    {
        self.labels.push(Label::new(name, value));
        self
    }

    pub fn extend<I>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = Label>,
    {
        self.labels.extend(labels);
        self
    }

    /// Fails on the first name seen twice.
    pub fn build(self) -> Result<Labels> {
        let mut seen = HashSet::with_capacity(self.labels.len());
        for label in &self.labels {
            if !seen.insert(label.name.as_str()) {
                return Err(Error::duplicate_label(&label.name));
            }
        }
        Ok(Labels(self.labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_for_metric_puts_name_first() -> Result<()> {
        let additional = vec![Label::new("env", "prod"), Label::new("run", "7")];
        let labels = Labels::for_metric("omb_results_publish_rate", &additional)?;

        let pairs: Vec<(&str, &str)> = labels.iter().map(|l| (l.name(), l.value())).collect();
        assert_eq!(
            pairs,
            vec![
                ("__name__", "omb_results_publish_rate"),
                ("env", "prod"),
                ("run", "7"),
            ]
        );
        assert_eq!(labels.metric_name(), Some("omb_results_publish_rate"));
        Ok(())
    }

    #[test]
    fn test_for_metric_without_additional_labels() -> Result<()> {
        let labels = Labels::for_metric("omb_results_consume_rate", &[])?;
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("__name__"), Some("omb_results_consume_rate"));
        Ok(())
    }

    #[test]
    fn test_duplicate_names_rejected() {
        #[rustfmt::skip]
        let tests = [
            vec![Label::new("env", "prod"), Label::new("env", "dev")],
            vec![Label::new("__name__", "other")],
            vec![Label::new("a", "1"), Label::new("b", "2"), Label::new("a", "1")],
        ];

        for additional in &tests {
            let err = Labels::for_metric("omb_results_consume_rate", additional)
                .expect_err("duplicate label name must be rejected");
            assert_eq!(err.kind(), ErrorKind::DuplicateLabelName, "for {:?}", additional);
        }
    }

    #[test]
    fn test_same_value_different_names_allowed() -> Result<()> {
        let labels = Labels::builder()
            .label("a", "x")
            .label("b", "x")
            .build()?;
        assert_eq!(labels.len(), 2);
        Ok(())
    }
}
