use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::enums::*;
use crate::errors::ApiError;
use crate::fields::model;

// ============ Shared Value Objects ============

model! {
    /// Risk assessment computed server-side.
    pub struct Risk {
        "code" => code, set_code: String;
        "reason" => reason, set_reason: String;
        /// Documented as a confidence between 0 and 1; not enforced here.
        "score" => score, set_score: f64;
    }
}

model! {
    /// Verification check applied to a company, an individual or a document.
    pub struct Check {
        "masked" => masked, set_masked: bool;
        "message" => message, set_message: String;
        "name" => name, set_name: String;
        /// Whether the check passed.
        "validate" => passed, set_passed: bool;
        "weight" => weight, set_weight: i64;
    }
}

model! {
    /// Potential AML screening match.
    pub struct AmlSuspicion {
        "caption" => caption, set_caption: String;
        "country" => country, set_country: String;
        "gender" => gender, set_gender: String;
        "relation" => relation, set_relation: String;
        /// Kind of entity matched, e.g. `Person` or `Company`.
        "schema" => schema, set_schema: String;
        "score" => score, set_score: f64;
        "source" => source, set_source: String;
        "status" => status, set_status: AmlSuspicionStatus;
        "type" => suspicion_type, set_suspicion_type: AmlSuspicionType;
    }
}

model! {
    /// Digital certificate issued for a completed verification.
    pub struct Certificate {
        "id" => id, set_id: String;
        "created_at" => created_at, set_created_at: DateTime<Utc>;
        "filename" => filename, set_filename: String;
    }
}

model! {
    /// Session metadata: client IP, callbacks, notification settings and
    /// workflow timestamps. Requests set the callback keys; responses carry
    /// the rest.
    pub struct TechnicalData {
        "active_aml_suspicions" => active_aml_suspicions, set_active_aml_suspicions: bool;
        "api_version" => api_version, set_api_version: i64;
        "approved_at" => approved_at, set_approved_at: DateTime<Utc>;
        "callback_url" => callback_url, set_callback_url: String;
        "callback_url_notification" => callback_url_notification, set_callback_url_notification: String;
        "disable_notification" => disable_notification, set_disable_notification: bool;
        "disable_notification_date" => disable_notification_date, set_disable_notification_date: DateTime<Utc>;
        "export_type" => export_type, set_export_type: String;
        "finished_at" => finished_at, set_finished_at: DateTime<Utc>;
        "ip" => ip, set_ip: String;
        "language" => language, set_language: String;
        "location_ip" => location_ip, set_location_ip: String;
        "need_review_at" => need_review_at, set_need_review_at: DateTime<Utc>;
        "notification_confirmation" => notification_confirmation, set_notification_confirmation: bool;
        "qr_code" => qr_code, set_qr_code: String;
        /// Ask the server to include raw provider payloads.
        "raw_data" => raw_data, set_raw_data: bool;
        "rejected_at" => rejected_at, set_rejected_at: DateTime<Utc>;
        /// Seconds.
        "session_duration" => session_duration, set_session_duration: i64;
        "started_at" => started_at, set_started_at: DateTime<Utc>;
        "transfer_at" => transfer_at, set_transfer_at: DateTime<Utc>;
        "transfer_mode" => transfer_mode, set_transfer_mode: String;
    }
}

model! {
    /// Workspace-defined custom property.
    pub struct Property {
        "name" => name, set_name: String;
        "type" => property_type, set_property_type: String;
        "value" => value, set_value: String;
    }
}

model! {
    pub struct Tag {
        "key" => key, set_key: String;
        "private" => is_private, set_private: bool;
        "type" => tag_type, set_tag_type: String;
        "value" => value, set_value: String;
    }
}

// ============ Companies ============

model! {
    /// Contact person at a company.
    pub struct Contact {
        "department" => department, set_department: String;
        "email" => email, set_email: String;
        "first_name" => first_name, set_first_name: String;
        "last_name" => last_name, set_last_name: String;
        "phone_number" => phone_number, set_phone_number: String;
    }
}

model! {
    /// Registry information about a legal entity. Sent in create and update
    /// requests (where `name` is required) and returned under `company`.
    pub struct CompanyInfo {
        /// Full postal address on a single line.
        "address" => address, set_address: String;
        "closure_date" => closure_date, set_closure_date: NaiveDate;
        "commercial_name" => commercial_name, set_commercial_name: String;
        "contact" => contact, set_contact: Contact;
        /// ISO 3166-1 alpha-2 country code.
        "country" => country, set_country: String;
        "email" => email, set_email: String;
        "employer_identification_number" => employer_identification_number, set_employer_identification_number: String;
        "employees" => employees, set_employees: i64;
        "insolvency_exists" => insolvency_exists, set_insolvency_exists: bool;
        "insolvency_ongoing" => insolvency_ongoing, set_insolvency_ongoing: bool;
        "legal_form" => legal_form, set_legal_form: String;
        "name" => name, set_name: String;
        "phone_number" => phone_number, set_phone_number: String;
        "registration_date" => registration_date, set_registration_date: NaiveDate;
        "registration_id" => registration_id, set_registration_id: String;
        /// Amount as written in the registry, e.g. `"100000"`.
        "share_capital" => share_capital, set_share_capital: String;
        "status" => status, set_status: String;
        "tax_identification_number" => tax_identification_number, set_tax_identification_number: String;
        /// Establishment type, e.g. `main`.
        "type" => company_type, set_company_type: String;
        "website_url" => website_url, set_website_url: String;
    }
}

model! {
    /// Company under verification.
    pub struct Company {
        "aml_suspicions" => aml_suspicions, set_aml_suspicions: Vec<AmlSuspicion>;
        "certificat" => certificate, set_certificate: Certificate;
        "checks" => checks, set_checks: Vec<Check>;
        "company" => company, set_company: CompanyInfo;
        "documents" => documents, set_documents: Vec<GenericDocument>;
        "members" => members, set_members: Vec<Member>;
        /// Back-office URL for internal users.
        "portal_url" => portal_url, set_portal_url: String;
        "properties" => properties, set_properties: Vec<Property>;
        "risk" => risk, set_risk: Risk;
        "source_id" => source_id, set_source_id: String;
        "technical_data" => technical_data, set_technical_data: TechnicalData;
        /// Public URL of the identification flow.
        "webview_url" => webview_url, set_webview_url: String;
    }
}

model! {
    /// Person or company acting within a [`Company`]: shareholder, director,
    /// beneficial owner. The record is flat; `type` says which of the
    /// person keys (`first_name`, `last_name`, `birthday`) or company keys
    /// (`name`, `registration_id`) apply.
    pub struct Member {
        "id" => id, set_id: String;
        "address" => address, set_address: String;
        "birthday" => birthday, set_birthday: DateTime<Utc>;
        "birthplace" => birthplace, set_birthplace: String;
        "country" => country, set_country: String;
        "documents" => documents, set_documents: Vec<GenericDocument>;
        "email" => email, set_email: String;
        "first_name" => first_name, set_first_name: String;
        "is_beneficial_owner" => is_beneficial_owner, set_is_beneficial_owner: bool;
        "is_delegator" => is_delegator, set_is_delegator: bool;
        "last_name" => last_name, set_last_name: String;
        "liveness_verification" => liveness_verification, set_liveness_verification: bool;
        "name" => name, set_name: String;
        /// Whole percent.
        "ownership_percentage" => ownership_percentage, set_ownership_percentage: i64;
        "phone_number" => phone_number, set_phone_number: String;
        "postal_code" => postal_code, set_postal_code: String;
        "registration_id" => registration_id, set_registration_id: String;
        "relation" => relation, set_relation: String;
        /// Free-form role label, e.g. `director`.
        "roles" => roles, set_roles: String;
        "source" => source, set_source: MemberSource;
        "state" => state, set_state: String;
        "status" => status, set_status: String;
        "type" => member_type, set_member_type: MemberType;
        "workspace_id" => workspace_id, set_workspace_id: String;
    }
}

/// Which half of a [`Member`] applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Person,
    Company,
    /// Member type this client does not know; carries the raw type literal.
    Unknown(String),
}

impl Member {
    /// Resolves the member kind from `type`.
    ///
    /// Without `type`, person name keys select `Person` and company keys
    /// select `Company`; a record with neither is `Unknown("")`.
    pub fn kind(&self) -> Result<MemberKind, ApiError> {
        match self.member_type()? {
            Some(MemberType::Person) => Ok(MemberKind::Person),
            Some(MemberType::Company) => Ok(MemberKind::Company),
            Some(MemberType::Other(raw)) => Ok(MemberKind::Unknown(raw)),
            None => {
                let fields = self.fields();
                if fields.contains("first_name") || fields.contains("last_name") {
                    Ok(MemberKind::Person)
                } else if fields.contains("name") || fields.contains("registration_id") {
                    Ok(MemberKind::Company)
                } else {
                    Ok(MemberKind::Unknown(String::new()))
                }
            }
        }
    }

    /// Human-readable name: `first last` for people, `name` for companies.
    pub fn display_name(&self) -> Result<Option<String>, ApiError> {
        match self.kind()? {
            MemberKind::Company => self.name(),
            MemberKind::Person | MemberKind::Unknown(_) => {
                let parts: Vec<String> = [self.first_name()?, self.last_name()?]
                    .into_iter()
                    .flatten()
                    .filter(|part| !part.is_empty())
                    .collect();
                if parts.is_empty() {
                    self.name()
                } else {
                    Ok(Some(parts.join(" ")))
                }
            }
        }
    }

    /// Builds a person member with its discriminator set.
    pub fn person(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let mut member = Self::new();
        member
            .set_member_type(MemberType::Person)
            .set_first_name(first_name.into())
            .set_last_name(last_name.into());
        member
    }

    /// Builds a company member with its discriminator set.
    pub fn company(name: impl Into<String>) -> Self {
        let mut member = Self::new();
        member
            .set_member_type(MemberType::Company)
            .set_name(name.into());
        member
    }
}

// ============ Individuals ============

model! {
    /// Civil information about a natural person. Sent in create and update
    /// requests and returned under `person`.
    pub struct PersonInfo {
        /// `DD/MM/YYYY` as the API renders it; kept as text.
        "birthday" => birthday, set_birthday: String;
        "email" => email, set_email: String;
        "face_image_signed_url" => face_image_signed_url, set_face_image_signed_url: String;
        "first_name" => first_name, set_first_name: String;
        "full_name" => full_name, set_full_name: String;
        "gender" => gender, set_gender: Gender;
        "last_name" => last_name, set_last_name: String;
        "maiden_name" => maiden_name, set_maiden_name: String;
        "phone_number" => phone_number, set_phone_number: String;
    }
}

model! {
    /// Identity document data read from the document itself. Dates are kept
    /// as the text printed on the document.
    pub struct IdentityCard {
        "id" => id, set_id: String;
        "back_document_signed_url" => back_document_signed_url, set_back_document_signed_url: String;
        "birth_place" => birth_place, set_birth_place: String;
        "birthday" => birthday, set_birthday: String;
        "country" => country, set_country: String;
        "expiration_date" => expiration_date, set_expiration_date: String;
        "first_name" => first_name, set_first_name: String;
        "front_document_signed_url" => front_document_signed_url, set_front_document_signed_url: String;
        "gender" => gender, set_gender: String;
        "issue_date" => issue_date, set_issue_date: String;
        "last_name" => last_name, set_last_name: String;
        /// Machine Readable Zone, first printed line.
        "mrz_line_1" => mrz_line_1, set_mrz_line_1: String;
        "mrz_line_2" => mrz_line_2, set_mrz_line_2: String;
        "mrz_line_3" => mrz_line_3, set_mrz_line_3: String;
        /// Document kind, e.g. `passport` or `id_card`.
        "type" => card_type, set_card_type: String;
    }
}

impl IdentityCard {
    /// Populated MRZ lines in printed order.
    pub fn mrz_lines(&self) -> Result<Vec<String>, ApiError> {
        Ok([self.mrz_line_1()?, self.mrz_line_2()?, self.mrz_line_3()?]
            .into_iter()
            .flatten()
            .collect())
    }
}

model! {
    /// Natural person under verification.
    pub struct Individual {
        "id" => id, set_id: String;
        "aml_suspicions" => aml_suspicions, set_aml_suspicions: Vec<AmlSuspicion>;
        /// Authentication link sent to the person.
        "auth_url" => auth_url, set_auth_url: String;
        "certificat" => certificate, set_certificate: Certificate;
        "checks" => checks, set_checks: Vec<Check>;
        "created_at" => created_at, set_created_at: DateTime<Utc>;
        "documents" => documents, set_documents: Vec<GenericDocument>;
        "identity_card" => identity_card, set_identity_card: IdentityCard;
        /// Sequence number within the workspace.
        "number" => number, set_number: i64;
        "person" => person, set_person: PersonInfo;
        "portal_url" => portal_url, set_portal_url: String;
        "properties" => properties, set_properties: Vec<Property>;
        "risk" => risk, set_risk: Risk;
        "source_id" => source_id, set_source_id: String;
        "state" => state, set_state: VerificationState;
        "status" => status, set_status: VerificationStatus;
        "tags" => tags, set_tags: Vec<Tag>;
        "technical_data" => technical_data, set_technical_data: TechnicalData;
        "webview_url" => webview_url, set_webview_url: String;
        "workspace_id" => workspace_id, set_workspace_id: String;
    }
}

// ============ Documents ============

model! {
    /// Summary entry in a document listing.
    pub struct Document {
        "id" => id, set_id: String;
        "document_type" => document_type, set_document_type: DocumentType;
        "filename" => filename, set_filename: String;
        "name" => name, set_name: String;
        "signed_url" => signed_url, set_signed_url: String;
        "state" => state, set_state: String;
        "status" => status, set_status: String;
        "workspace_id" => workspace_id, set_workspace_id: String;
    }
}

model! {
    /// Documents attached to a company or an individual, plus the total
    /// count the server reports.
    pub struct DocumentResponse {
        "documents" => documents, set_documents: Vec<Document>;
        "total_document" => total_document, set_total_document: i64;
    }
}

model! {
    /// Uploaded document with the values and tables extracted from it.
    pub struct GenericDocument {
        "id" => id, set_id: String;
        "checks" => checks, set_checks: Vec<Check>;
        "created_at" => created_at, set_created_at: DateTime<Utc>;
        "document_type" => document_type, set_document_type: DocumentType;
        "name" => name, set_name: String;
        "signed_url" => signed_url, set_signed_url: String;
        "state" => state, set_state: String;
        "status" => status, set_status: String;
        "tables" => tables, set_tables: Vec<ExtractedTable>;
        "values" => values, set_values: Vec<ExtractedValue>;
    }
}

model! {
    /// One extracted value.
    pub struct ExtractedValue {
        "confidence" => confidence, set_confidence: f64;
        "name" => name, set_name: String;
        "value" => value, set_value: Vec<i64>;
    }
}

model! {
    /// Table rows extracted from a document, passed through as-is.
    pub struct ExtractedTable {
        "operation" => operation, set_operation: Vec<Value>;
    }
}

impl GenericDocument {
    /// Looks up an extracted value by name.
    pub fn value_named(&self, name: &str) -> Result<Option<ExtractedValue>, ApiError> {
        Ok(self
            .values()?
            .unwrap_or_default()
            .into_iter()
            .find(|value| matches!(value.name(), Ok(Some(ref n)) if n == name)))
    }
}
