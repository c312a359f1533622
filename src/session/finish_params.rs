// Deferred finish params
//
// Metadata announced while an item is running but only sent to the backend
// with that item's finish call. The per-test slot is consumed by test end;
// suite overrides are keyed by suite title and consumed by the next suite
// end with that title.

use crate::model::{Attribute, FinishItemPayload, ItemStatus, StatusRequest, TestCaseIdRequest};
use std::collections::HashMap;

/// Params collected for one item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinishParams {
    pub attributes: Vec<Attribute>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
    pub test_case_id: Option<String>,
}

impl FinishParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay onto a base finish payload: attributes are appended, the
    /// other fields replace the base value when set
    pub fn apply_to(self, payload: &mut FinishItemPayload) {
        payload.attributes.extend(self.attributes);
        if self.description.is_some() {
            payload.description = self.description;
        }
        if self.status.is_some() {
            payload.status = self.status;
        }
        if self.test_case_id.is_some() {
            payload.test_case_id = self.test_case_id;
        }
    }
}

/// Accumulator for the current test and for title-keyed suites
#[derive(Debug, Default)]
pub struct FinishParamsAccumulator {
    current: FinishParams,
    suite_test_case_ids: HashMap<String, String>,
    suite_statuses: HashMap<String, ItemStatus>,
}

impl FinishParamsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attributes(&mut self, attributes: &[Attribute]) {
        self.current.attributes.extend_from_slice(attributes);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.current.description = Some(description.into());
    }

    pub fn set_test_case_id(&mut self, request: TestCaseIdRequest) {
        match request.suite_title {
            Some(title) => {
                self.suite_test_case_ids.insert(title, request.test_case_id);
            }
            None if !request.test_case_id.is_empty() => {
                self.current.test_case_id = Some(request.test_case_id);
            }
            None => {}
        }
    }

    pub fn set_status(&mut self, request: StatusRequest) {
        match request.suite_title {
            Some(title) => {
                self.suite_statuses.insert(title, request.status);
            }
            None => self.current.status = Some(request.status),
        }
    }

    pub fn current(&self) -> &FinishParams {
        &self.current
    }

    /// Hand over the current test's params and start over empty
    pub fn take_current(&mut self) -> FinishParams {
        std::mem::take(&mut self.current)
    }

    /// Hand over (and forget) the overrides registered for a suite title
    pub fn take_suite(&mut self, title: &str) -> FinishParams {
        FinishParams {
            status: self.suite_statuses.remove(title),
            test_case_id: self.suite_test_case_ids.remove(title),
            ..FinishParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_payload() -> FinishItemPayload {
        FinishItemPayload {
            end_time: 100,
            status: Some(ItemStatus::Passed),
            ..Default::default()
        }
    }

    #[test]
    fn test_attributes_append_with_duplicates() {
        let mut acc = FinishParamsAccumulator::new();
        let attr = Attribute::new("browser", "chrome");

        acc.add_attributes(std::slice::from_ref(&attr));
        acc.add_attributes(&[]);
        acc.add_attributes(std::slice::from_ref(&attr));

        assert_eq!(acc.current().attributes, vec![attr.clone(), attr]);
    }

    #[test]
    fn test_description_last_write_wins() {
        let mut acc = FinishParamsAccumulator::new();
        acc.set_description("first");
        acc.set_description("second");

        assert_eq!(acc.current().description.as_deref(), Some("second"));
    }

    #[test]
    fn test_take_current_resets() {
        let mut acc = FinishParamsAccumulator::new();
        acc.add_attributes(&[Attribute::tag("smoke")]);
        acc.set_status(StatusRequest {
            status: ItemStatus::Skipped,
            suite_title: None,
        });

        let taken = acc.take_current();

        assert_eq!(taken.status, Some(ItemStatus::Skipped));
        assert!(acc.current().is_empty());
    }

    #[test]
    fn test_empty_test_case_id_ignored_for_current_test() {
        let mut acc = FinishParamsAccumulator::new();
        acc.set_test_case_id(TestCaseIdRequest {
            test_case_id: String::new(),
            suite_title: None,
        });

        assert!(acc.current().test_case_id.is_none());
    }

    #[test]
    fn test_suite_overrides_consumed_once() {
        let mut acc = FinishParamsAccumulator::new();
        acc.set_test_case_id(TestCaseIdRequest {
            test_case_id: "TC-1".to_string(),
            suite_title: Some("Cart".to_string()),
        });
        acc.set_status(StatusRequest {
            status: ItemStatus::Failed,
            suite_title: Some("Cart".to_string()),
        });

        assert!(acc.take_suite("Checkout").is_empty());
        let first = acc.take_suite("Cart");
        let second = acc.take_suite("Cart");

        assert_eq!(first.test_case_id.as_deref(), Some("TC-1"));
        assert_eq!(first.status, Some(ItemStatus::Failed));
        assert!(second.is_empty());
        assert!(acc.current().is_empty());
    }

    #[test]
    fn test_apply_overlays_and_concatenates() {
        let mut payload = base_payload();
        payload.attributes.push(Attribute::tag("base"));
        let params = FinishParams {
            attributes: vec![Attribute::tag("extra")],
            description: Some("docs".to_string()),
            status: Some(ItemStatus::Failed),
            test_case_id: None,
        };

        params.apply_to(&mut payload);

        assert_eq!(
            payload.attributes,
            vec![Attribute::tag("base"), Attribute::tag("extra")]
        );
        assert_eq!(payload.description.as_deref(), Some("docs"));
        assert_eq!(payload.status, Some(ItemStatus::Failed));
        assert_eq!(payload.test_case_id, None);
        assert_eq!(payload.end_time, 100);
    }
}
