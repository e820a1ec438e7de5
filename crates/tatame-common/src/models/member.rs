//! Member model — one document per registered person.
//!
//! The wire shape mirrors the documents the legacy registration client wrote
//! into the hosted store: camelCase keys, Portuguese belt names, and a few
//! quirks (numeric strings, Portuguese status values) that must keep
//! deserializing.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::paydate::PayDate;

/// Fixed role set. Registration always creates a student; admins are
/// provisioned directly in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Rank set offered at registration. The serialized values are the Portuguese
/// strings already present in stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Belt {
    #[serde(rename = "Faixa Branca")]
    White,
    #[serde(rename = "Faixa Cinza e Branca")]
    GreyWhite,
    #[serde(rename = "Faixa Azul")]
    Blue,
    #[serde(rename = "Faixa Roxa")]
    Purple,
    #[serde(rename = "Faixa Marrom")]
    Brown,
    #[serde(rename = "Faixa Preta")]
    Black,
}

/// Payment lifecycle state of a membership cycle.
///
/// One canonical enumeration. Documents written by the legacy client carry
/// Portuguese values; those are accepted as read-time aliases and rewritten
/// canonically on the next write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment ever recorded.
    #[default]
    Unset,
    /// Member signaled intent to pay; waiting for admin confirmation.
    #[serde(alias = "aguardando")]
    Awaiting,
    /// Admin verified the payment; carries the initiation date.
    #[serde(alias = "concluído", alias = "concluido")]
    Confirmed,
    /// The confirmed cycle lapsed; a new cycle must begin.
    #[serde(alias = "pendente")]
    Pending,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Unset => "unset",
            PaymentStatus::Awaiting => "awaiting",
            PaymentStatus::Confirmed => "confirmed",
            PaymentStatus::Pending => "pending",
        };
        f.write_str(s)
    }
}

/// A registered member of the academy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Opaque identifier issued by the identity provider; store primary key.
    pub uid: String,

    pub full_name: String,
    pub nickname: String,
    pub email: String,
    pub belt: Belt,

    #[serde(deserialize_with = "number_or_string")]
    pub birth_year: u16,
    #[serde(deserialize_with = "number_or_string")]
    pub birth_month: u8,
    #[serde(deserialize_with = "number_or_string")]
    pub birth_day: u8,

    pub role: Role,

    /// Absent in documents created before the payment flow existed.
    #[serde(default)]
    pub payment_status: PaymentStatus,

    /// Raw `dd/mm/yyyy` string, kept verbatim so unparseable legacy values
    /// round-trip untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
}

impl Member {
    /// The payment date as a calendar day, if present and parseable.
    pub fn payment_day(&self) -> Option<PayDate> {
        self.payment_date.as_deref().and_then(PayDate::parse)
    }

    /// Apply a payment patch the way the store would.
    pub fn apply(&mut self, patch: &PaymentPatch) {
        self.payment_status = patch.payment_status;
        if let Some(date) = &patch.payment_date {
            self.payment_date = Some(date.clone());
        }
    }
}

/// Partial update applied to a member's payment fields.
///
/// This is exactly the body of a conditional PATCH against the record store:
/// a new status, and optionally a re-stamped date. `payment_date: None`
/// leaves the stored date untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPatch {
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
}

/// Registration request. Profile fields are fixed after this point.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 120, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 40, message = "Nickname is required"))]
    pub nickname: String,

    pub belt: Belt,

    #[validate(range(min = 1930, max = 2100, message = "Birth year out of range"))]
    pub birth_year: u16,
    #[validate(range(min = 1, max = 12, message = "Birth month out of range"))]
    pub birth_month: u8,
    #[validate(range(min = 1, max = 31, message = "Birth day out of range"))]
    pub birth_day: u8,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Password reset request.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Member representation for API responses.
///
/// `payment_date` is the canonical `dd/mm/yyyy` rendering; an absent or
/// unparseable stored date surfaces as `null` ("not informed").
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub uid: String,
    pub full_name: String,
    pub nickname: String,
    pub email: String,
    pub belt: Belt,
    pub role: Role,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<String>,
}

impl From<Member> for MemberView {
    fn from(m: Member) -> Self {
        let payment_date = m.payment_day().map(|d| d.to_string());
        Self {
            uid: m.uid,
            full_name: m.full_name,
            nickname: m.nickname,
            email: m.email,
            belt: m.belt,
            role: m.role,
            payment_status: m.payment_status,
            payment_date,
        }
    }
}

/// Accept a number that legacy documents stored as a JSON string (the legacy
/// client wrote `<select>` values verbatim).
fn number_or_string<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(de)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_doc() -> serde_json::Value {
        serde_json::json!({
            "uid": "abc123",
            "fullName": "Ana Silva",
            "nickname": "Tubarão",
            "email": "ana@example.com",
            "belt": "Faixa Azul",
            "birthYear": "1995",
            "birthMonth": "3",
            "birthDay": "12",
            "role": "student",
            "paymentStatus": "aguardando",
            "paymentDate": "10/01/2024"
        })
    }

    #[test]
    fn reads_legacy_document() {
        let m: Member = serde_json::from_value(legacy_doc()).expect("should deserialize");
        assert_eq!(m.birth_year, 1995);
        assert_eq!(m.birth_month, 3);
        assert_eq!(m.payment_status, PaymentStatus::Awaiting);
        assert_eq!(m.payment_day().unwrap().to_string(), "10/01/2024");
    }

    #[test]
    fn legacy_status_aliases() {
        for (raw, expected) in [
            ("pendente", PaymentStatus::Pending),
            ("aguardando", PaymentStatus::Awaiting),
            ("concluído", PaymentStatus::Confirmed),
            ("confirmed", PaymentStatus::Confirmed),
        ] {
            let v = serde_json::json!(raw);
            let parsed: PaymentStatus = serde_json::from_value(v).expect(raw);
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn missing_payment_fields_default() {
        let mut doc = legacy_doc();
        doc.as_object_mut().unwrap().remove("paymentStatus");
        doc.as_object_mut().unwrap().remove("paymentDate");
        let m: Member = serde_json::from_value(doc).expect("should deserialize");
        assert_eq!(m.payment_status, PaymentStatus::Unset);
        assert!(m.payment_date.is_none());
    }

    #[test]
    fn unparseable_date_surfaces_as_not_informed() {
        let mut doc = legacy_doc();
        doc.as_object_mut().unwrap()["paymentDate"] = serde_json::json!("soon™");
        let m: Member = serde_json::from_value(doc).expect("should deserialize");
        assert!(m.payment_day().is_none());
        let view = MemberView::from(m);
        assert_eq!(view.payment_date, None);
    }

    #[test]
    fn writes_canonical_document() {
        let m: Member = serde_json::from_value(legacy_doc()).unwrap();
        let out = serde_json::to_value(&m).unwrap();
        assert_eq!(out["paymentStatus"], "awaiting");
        assert_eq!(out["belt"], "Faixa Azul");
        assert_eq!(out["birthYear"], 1995);
        assert_eq!(out["paymentDate"], "10/01/2024");
    }

    #[test]
    fn payment_patch_omits_untouched_date() {
        let patch = PaymentPatch {
            payment_status: PaymentStatus::Confirmed,
            payment_date: None,
        };
        let v = serde_json::to_value(&patch).unwrap();
        assert_eq!(v, serde_json::json!({"paymentStatus": "confirmed"}));
    }
}
