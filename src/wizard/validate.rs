use crate::models::booking::{BookingDraft, DraftField};
use crate::wizard::{Step, WizardError};

/// Extra checks on the receiver's contact details, on top of non-emptiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactRules {
    #[default]
    Presence,
    Strict,
}

pub fn validate_step(step: Step, draft: &BookingDraft, rules: ContactRules) -> Result<(), WizardError> {
    match step {
        Step::Route => validate_route(draft),
        Step::Package => validate_package(draft),
        Step::Receiver => validate_receiver(draft, rules),
        Step::Submitted => Err(WizardError::AlreadySubmitted),
    }
}

pub fn is_step_valid(step: Step, draft: &BookingDraft, rules: ContactRules) -> bool {
    validate_step(step, draft, rules).is_ok()
}

pub fn validate_route(draft: &BookingDraft) -> Result<(), WizardError> {
    let missing = collect_missing([
        (DraftField::PickupPoint, is_blank(&draft.pickup_point)),
        (DraftField::DropPoint, is_blank(&draft.drop_point)),
    ]);
    ensure_complete(Step::Route, missing)?;

    if draft.pickup_point.trim() == draft.drop_point.trim() {
        return Err(WizardError::SamePickupAndDrop);
    }

    Ok(())
}

pub fn validate_package(draft: &BookingDraft) -> Result<(), WizardError> {
    let missing = collect_missing([
        (DraftField::PackageCategory, draft.package_category.is_none()),
        (DraftField::PackageType, draft.package_type.is_none()),
        (DraftField::Weight, is_blank(&draft.weight)),
        (DraftField::Description, is_blank(&draft.description)),
    ]);
    ensure_complete(Step::Package, missing)
}

pub fn validate_receiver(draft: &BookingDraft, rules: ContactRules) -> Result<(), WizardError> {
    let missing = collect_missing([
        (DraftField::ReceiverName, is_blank(&draft.receiver_name)),
        (DraftField::ReceiverPhone, is_blank(&draft.receiver_phone)),
        (DraftField::ReceiverEmail, is_blank(&draft.receiver_email)),
    ]);
    ensure_complete(Step::Receiver, missing)?;

    if rules == ContactRules::Strict {
        if !looks_like_phone(&draft.receiver_phone) {
            return Err(WizardError::InvalidContact {
                field: DraftField::ReceiverPhone,
            });
        }
        if !looks_like_email(&draft.receiver_email) {
            return Err(WizardError::InvalidContact {
                field: DraftField::ReceiverEmail,
            });
        }
    }

    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn collect_missing<const N: usize>(checks: [(DraftField, bool); N]) -> Vec<DraftField> {
    checks
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
}

fn ensure_complete(step: Step, missing: Vec<DraftField>) -> Result<(), WizardError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(WizardError::Incomplete {
            step: step.index(),
            missing,
        })
    }
}

fn looks_like_phone(value: &str) -> bool {
    let value = value.trim();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    let digits = value.chars().filter(char::is_ascii_digit).count();

    allowed && (10..=15).contains(&digits) && !value[1..].contains('+')
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::{is_step_valid, validate_package, validate_receiver, validate_route, ContactRules};
    use crate::models::booking::{BookingDraft, DraftField, PackageCategory, PackageType};
    use crate::wizard::{Step, WizardError};

    fn route(pickup: &str, drop: &str) -> BookingDraft {
        BookingDraft {
            pickup_point: pickup.to_string(),
            drop_point: drop.to_string(),
            ..BookingDraft::default()
        }
    }

    fn receiver(name: &str, phone: &str, email: &str) -> BookingDraft {
        BookingDraft {
            receiver_name: name.to_string(),
            receiver_phone: phone.to_string(),
            receiver_email: email.to_string(),
            ..BookingDraft::default()
        }
    }

    #[test]
    fn identical_points_fail_route_step() {
        let points = ["Chennai", "Salem Central Bus Stand", "x"];
        for point in points {
            let draft = route(point, point);
            assert_eq!(validate_route(&draft), Err(WizardError::SamePickupAndDrop));
            assert!(!is_step_valid(Step::Route, &draft, ContactRules::Presence));
        }
    }

    #[test]
    fn distinct_points_pass_route_step() {
        let pairs = [
            ("Chennai Koyambedu Bus Stand", "Coimbatore Central Bus Stand"),
            ("Madurai", "Salem"),
            ("a", "b"),
        ];
        for (pickup, drop) in pairs {
            assert!(is_step_valid(Step::Route, &route(pickup, drop), ContactRules::Presence));
        }
    }

    #[test]
    fn missing_route_fields_are_reported() {
        let err = validate_route(&route("", "  ")).unwrap_err();
        assert_eq!(
            err,
            WizardError::Incomplete {
                step: 1,
                missing: vec![DraftField::PickupPoint, DraftField::DropPoint],
            }
        );
    }

    #[test]
    fn volume_is_optional_for_package_step() {
        let draft = BookingDraft {
            package_category: Some(PackageCategory::Personal),
            package_type: Some(PackageType::Books),
            weight: "2.5".to_string(),
            description: "Two textbooks".to_string(),
            ..BookingDraft::default()
        };
        assert_eq!(validate_package(&draft), Ok(()));
    }

    #[test]
    fn package_step_lists_every_missing_field() {
        let draft = BookingDraft {
            package_type: Some(PackageType::Documents),
            ..BookingDraft::default()
        };
        let Err(WizardError::Incomplete { step, missing }) = validate_package(&draft) else {
            panic!("expected incomplete package step");
        };
        assert_eq!(step, 2);
        assert_eq!(
            missing,
            vec![DraftField::PackageCategory, DraftField::Weight, DraftField::Description]
        );
    }

    #[test]
    fn presence_rules_accept_any_non_empty_contact() {
        let draft = receiver("Suresh Kumar", "123", "not-an-email");
        assert_eq!(validate_receiver(&draft, ContactRules::Presence), Ok(()));
    }

    #[test]
    fn strict_rules_check_contact_format() {
        let bad_phone = receiver("Suresh Kumar", "123", "suresh@example.com");
        assert_eq!(
            validate_receiver(&bad_phone, ContactRules::Strict),
            Err(WizardError::InvalidContact {
                field: DraftField::ReceiverPhone
            })
        );

        let bad_email = receiver("Suresh Kumar", "+91 9876543210", "suresh@example");
        assert_eq!(
            validate_receiver(&bad_email, ContactRules::Strict),
            Err(WizardError::InvalidContact {
                field: DraftField::ReceiverEmail
            })
        );

        let good = receiver("Suresh Kumar", "+91 98765-43210", "suresh@example.com");
        assert_eq!(validate_receiver(&good, ContactRules::Strict), Ok(()));
    }

    #[test]
    fn whitespace_only_receiver_fields_are_missing() {
        let draft = receiver("  ", "+91 9876543210", "a@b.co");
        assert!(!is_step_valid(Step::Receiver, &draft, ContactRules::Presence));
    }
}
