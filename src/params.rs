//! Request parameter objects, one per REST operation.
//!
//! Each type carries its path parameters plus three independent bags: query
//! parameters, headers and JSON body fields. Required fields are checked when
//! read; a missing one is an [`ApiError::MissingArgument`] naming the field.

use base64::Engine;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;

use crate::endpoint::{decode_list, decode_one, Endpoint};
use crate::enums::{DocumentType, VerificationState, VerificationStatus};
use crate::errors::ApiError;
use crate::fields::Fields;
use crate::models::*;

/// Query, header and body bags shared by every params type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBags {
    query: Fields,
    headers: Vec<(String, String)>,
    body: Fields,
}

impl ParamBags {
    pub fn query(&self) -> &Fields {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Fields {
        &mut self.query
    }

    pub fn body(&self) -> &Fields {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Fields {
        &mut self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Sets a header, replacing any previous value (names compare
    /// case-insensitively).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(idx) => self.headers[idx].1 = value,
            None => self.headers.push((name, value)),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Populated query entries rendered as string pairs.
    ///
    /// Strings go out as-is, numbers and booleans as their JSON text, arrays
    /// as repeated keys. `null` and objects are skipped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in self.query.iter() {
            push_query_value(&mut pairs, key, value);
        }
        pairs
    }
}

fn push_query_value(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null | Value::Object(_) => {}
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Bool(b) => pairs.push((key.to_string(), b.to_string())),
        Value::Number(n) => pairs.push((key.to_string(), n.to_string())),
        Value::Array(items) => {
            for item in items {
                push_query_value(pairs, key, item);
            }
        }
    }
}

/// Common plumbing for every params type: bag access and extra headers.
macro_rules! params_common {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn bags(&self) -> &ParamBags {
                &self.bags
            }

            pub fn bags_mut(&mut self) -> &mut ParamBags {
                &mut self.bags
            }

            /// Adds a caller-supplied header to this request.
            pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                self.bags.set_header(name, value);
                self
            }
        }
    };
}

/// Body fields shared by create and update requests: the required
/// `workspace_id`, plus `source_id` and `technical_data`.
macro_rules! write_body {
    ($name:ident) => {
        impl $name {
            pub fn workspace_id(&self) -> Result<String, ApiError> {
                self.bags.body().require("workspace_id")
            }

            pub fn with_workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
                self.bags.body_mut().set("workspace_id", workspace_id.into());
                self
            }

            /// Caller-side identifier used to correlate the record with
            /// another system.
            pub fn source_id(&self) -> Result<Option<String>, ApiError> {
                self.bags.body().get("source_id")
            }

            pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
                self.bags.body_mut().set("source_id", source_id.into());
                self
            }

            /// Callback and notification settings.
            pub fn technical_data(&self) -> Result<Option<TechnicalData>, ApiError> {
                self.bags.body().get("technical_data")
            }

            pub fn with_technical_data(mut self, technical_data: TechnicalData) -> Self {
                self.bags.body_mut().set("technical_data", technical_data);
                self
            }
        }
    };
}

/// `document` and `scope` query accessors for retrieve operations.
macro_rules! retrieve_query {
    ($name:ident) => {
        impl $name {
            /// Whether signed document URLs are included.
            pub fn document(&self) -> Result<Option<bool>, ApiError> {
                self.bags.query().get("document")
            }

            pub fn with_document(mut self, document: bool) -> Self {
                self.bags.query_mut().set("document", document);
                self
            }

            /// Lookup scope: `id` (default) or `scope`.
            pub fn scope(&self) -> Result<Option<String>, ApiError> {
                self.bags.query().get("scope")
            }

            pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
                self.bags.query_mut().set("scope", scope.into());
                self
            }
        }
    };
}

/// Filter and paging query accessors for list operations.
macro_rules! list_filters {
    ($name:ident) => {
        impl $name {
            /// Created on or before this date.
            pub fn end_date(&self) -> Result<Option<NaiveDate>, ApiError> {
                self.bags.query().get("end_date")
            }

            pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
                self.bags.query_mut().set("end_date", end_date);
                self
            }

            /// Page size, documented as 1 to 100; not enforced here.
            pub fn limit(&self) -> Result<Option<u64>, ApiError> {
                self.bags.query().get("limit")
            }

            pub fn with_limit(mut self, limit: u64) -> Self {
                self.bags.query_mut().set("limit", limit);
                self
            }

            pub fn offset(&self) -> Result<Option<u64>, ApiError> {
                self.bags.query().get("offset")
            }

            pub fn with_offset(mut self, offset: u64) -> Self {
                self.bags.query_mut().set("offset", offset);
                self
            }

            pub fn source_id(&self) -> Result<Option<String>, ApiError> {
                self.bags.query().get("source_id")
            }

            pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
                self.bags.query_mut().set("source_id", source_id.into());
                self
            }

            /// Created on or after this date.
            pub fn start_date(&self) -> Result<Option<NaiveDate>, ApiError> {
                self.bags.query().get("start_date")
            }

            pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
                self.bags.query_mut().set("start_date", start_date);
                self
            }

            pub fn state(&self) -> Result<Option<VerificationState>, ApiError> {
                self.bags.query().get("state")
            }

            pub fn with_state(mut self, state: VerificationState) -> Self {
                self.bags.query_mut().set("state", state);
                self
            }

            pub fn status(&self) -> Result<Option<VerificationStatus>, ApiError> {
                self.bags.query().get("status")
            }

            pub fn with_status(mut self, status: VerificationStatus) -> Self {
                self.bags.query_mut().set("status", status);
                self
            }

            pub fn workspace_id(&self) -> Result<Option<String>, ApiError> {
                self.bags.query().get("workspace_id")
            }

            pub fn with_workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
                self.bags.query_mut().set("workspace_id", workspace_id.into());
                self
            }
        }
    };
}

/// Path id accessors for operations on a single resource.
macro_rules! path_id {
    ($name:ident) => {
        impl $name {
            pub fn id(&self) -> Result<&str, ApiError> {
                require_path(&self.id, "id")
            }

            pub fn with_id(mut self, id: impl Into<String>) -> Self {
                self.id = Some(id.into());
                self
            }
        }
    };
}

fn require_path<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::MissingArgument(field.to_string()))
}

/// Reads the required `company` block and its required `name`.
fn require_company(body: &Fields) -> Result<CompanyInfo, ApiError> {
    let company: CompanyInfo = body.require("company")?;
    company
        .name()?
        .ok_or_else(|| ApiError::MissingArgument("company.name".to_string()))?;
    Ok(company)
}

// ============ Companies ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateCompanyParams {
    bags: ParamBags,
}

params_common!(CreateCompanyParams);
write_body!(CreateCompanyParams);

impl CreateCompanyParams {
    /// Registry information; `name` is required.
    pub fn company(&self) -> Result<CompanyInfo, ApiError> {
        require_company(self.bags.body())
    }

    pub fn with_company(mut self, company: CompanyInfo) -> Self {
        self.bags.body_mut().set("company", company);
        self
    }
}

impl Endpoint for CreateCompanyParams {
    type Output = Company;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["companies".to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.company()?;
        self.workspace_id()?;
        Ok(())
    }

    fn sends_body(&self) -> bool {
        true
    }

    fn decode(body: &str) -> Result<Company, ApiError> {
        decode_one(body, "company")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveCompanyParams {
    id: Option<String>,
    bags: ParamBags,
}

params_common!(RetrieveCompanyParams);
path_id!(RetrieveCompanyParams);
retrieve_query!(RetrieveCompanyParams);

impl Endpoint for RetrieveCompanyParams {
    type Output = Company;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["companies".to_string(), self.id()?.to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.id().map(|_| ())
    }

    fn decode(body: &str) -> Result<Company, ApiError> {
        decode_one(body, "company")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCompanyParams {
    id: Option<String>,
    bags: ParamBags,
}

params_common!(UpdateCompanyParams);
path_id!(UpdateCompanyParams);
write_body!(UpdateCompanyParams);

impl UpdateCompanyParams {
    /// Replacement registry information; `name` is required.
    pub fn company(&self) -> Result<CompanyInfo, ApiError> {
        require_company(self.bags.body())
    }

    pub fn with_company(mut self, company: CompanyInfo) -> Self {
        self.bags.body_mut().set("company", company);
        self
    }
}

impl Endpoint for UpdateCompanyParams {
    type Output = Company;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["companies".to_string(), self.id()?.to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.id()?;
        self.company()?;
        self.workspace_id()?;
        Ok(())
    }

    fn sends_body(&self) -> bool {
        true
    }

    fn decode(body: &str) -> Result<Company, ApiError> {
        decode_one(body, "company")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCompaniesParams {
    bags: ParamBags,
}

params_common!(ListCompaniesParams);
list_filters!(ListCompaniesParams);

impl Endpoint for ListCompaniesParams {
    type Output = Vec<Company>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["companies".to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn decode(body: &str) -> Result<Vec<Company>, ApiError> {
        decode_list(body, "companies")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteCompanyParams {
    id: Option<String>,
    bags: ParamBags,
}

params_common!(DeleteCompanyParams);
path_id!(DeleteCompanyParams);

impl Endpoint for DeleteCompanyParams {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["companies".to_string(), self.id()?.to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.id().map(|_| ())
    }

    fn decode(_body: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

// ============ Individuals ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateIndividualParams {
    bags: ParamBags,
}

params_common!(CreateIndividualParams);
write_body!(CreateIndividualParams);

impl CreateIndividualParams {
    pub fn person(&self) -> Result<Option<PersonInfo>, ApiError> {
        self.bags.body().get("person")
    }

    pub fn with_person(mut self, person: PersonInfo) -> Self {
        self.bags.body_mut().set("person", person);
        self
    }
}

impl Endpoint for CreateIndividualParams {
    type Output = Individual;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["individuals".to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.workspace_id()?;
        self.person()?;
        Ok(())
    }

    fn sends_body(&self) -> bool {
        true
    }

    fn decode(body: &str) -> Result<Individual, ApiError> {
        decode_one(body, "individual")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrieveIndividualParams {
    id: Option<String>,
    bags: ParamBags,
}

params_common!(RetrieveIndividualParams);
path_id!(RetrieveIndividualParams);
retrieve_query!(RetrieveIndividualParams);

impl Endpoint for RetrieveIndividualParams {
    type Output = Individual;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["individuals".to_string(), self.id()?.to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.id().map(|_| ())
    }

    fn decode(body: &str) -> Result<Individual, ApiError> {
        decode_one(body, "individual")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateIndividualParams {
    id: Option<String>,
    bags: ParamBags,
}

params_common!(UpdateIndividualParams);
path_id!(UpdateIndividualParams);
write_body!(UpdateIndividualParams);

impl UpdateIndividualParams {
    pub fn person(&self) -> Result<Option<PersonInfo>, ApiError> {
        self.bags.body().get("person")
    }

    pub fn with_person(mut self, person: PersonInfo) -> Self {
        self.bags.body_mut().set("person", person);
        self
    }
}

impl Endpoint for UpdateIndividualParams {
    type Output = Individual;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["individuals".to_string(), self.id()?.to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.id()?;
        self.workspace_id()?;
        self.person()?;
        Ok(())
    }

    fn sends_body(&self) -> bool {
        true
    }

    fn decode(body: &str) -> Result<Individual, ApiError> {
        decode_one(body, "individual")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListIndividualsParams {
    bags: ParamBags,
}

params_common!(ListIndividualsParams);
list_filters!(ListIndividualsParams);

impl Endpoint for ListIndividualsParams {
    type Output = Vec<Individual>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["individuals".to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn decode(body: &str) -> Result<Vec<Individual>, ApiError> {
        decode_list(body, "individuals")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteIndividualParams {
    id: Option<String>,
    bags: ParamBags,
}

params_common!(DeleteIndividualParams);
path_id!(DeleteIndividualParams);

impl Endpoint for DeleteIndividualParams {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["individuals".to_string(), self.id()?.to_string()])
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.id().map(|_| ())
    }

    fn decode(_body: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

// ============ Documents ============

/// Resource a document is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOwner {
    Company(String),
    Individual(String),
}

impl DocumentOwner {
    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        let (collection, id) = match self {
            DocumentOwner::Company(id) => ("companies", id),
            DocumentOwner::Individual(id) => ("individuals", id),
        };
        if id.is_empty() {
            return Err(ApiError::MissingArgument("owner".to_string()));
        }
        Ok(vec![
            collection.to_string(),
            id.clone(),
            "documents".to_string(),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDocumentParams {
    owner: Option<DocumentOwner>,
    bags: ParamBags,
}

params_common!(UploadDocumentParams);

impl UploadDocumentParams {
    pub fn owner(&self) -> Result<&DocumentOwner, ApiError> {
        self.owner
            .as_ref()
            .ok_or_else(|| ApiError::MissingArgument("owner".to_string()))
    }

    pub fn with_owner(mut self, owner: DocumentOwner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn document_type(&self) -> Result<DocumentType, ApiError> {
        self.bags.body().require("document_type")
    }

    pub fn with_document_type(mut self, document_type: impl Into<DocumentType>) -> Self {
        self.bags.body_mut().set("document_type", document_type.into());
        self
    }

    /// Inline file content, base64-encoded.
    pub fn file(&self) -> Result<Option<String>, ApiError> {
        self.bags.body().get("file")
    }

    /// Sets already base64-encoded content.
    pub fn with_file(mut self, encoded: impl Into<String>) -> Self {
        self.bags.body_mut().set("file", encoded.into());
        self
    }

    /// Encodes raw bytes as base64 and sets them as the file content.
    pub fn with_file_bytes(self, bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        self.with_file(encoded)
    }

    /// Remote location the server fetches the file from.
    pub fn url(&self) -> Result<Option<String>, ApiError> {
        self.bags.body().get("url")
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.bags.body_mut().set("url", url.into());
        self
    }
}

impl Endpoint for UploadDocumentParams {
    type Output = GenericDocument;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        self.owner()?.path_segments()
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.owner()?;
        self.document_type()?;
        // `file` and `url` are alternatives; the server decides what to do
        // when neither or both are present.
        let has_file = self.bags.body().contains("file");
        let has_url = self.bags.body().contains("url");
        if has_file == has_url {
            tracing::debug!(has_file, has_url, "Document upload without exactly one of file/url");
        }
        Ok(())
    }

    fn sends_body(&self) -> bool {
        true
    }

    fn decode(body: &str) -> Result<GenericDocument, ApiError> {
        decode_one(body, "document")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDocumentsParams {
    owner: Option<DocumentOwner>,
    bags: ParamBags,
}

params_common!(ListDocumentsParams);

impl ListDocumentsParams {
    pub fn owner(&self) -> Result<&DocumentOwner, ApiError> {
        self.owner
            .as_ref()
            .ok_or_else(|| ApiError::MissingArgument("owner".to_string()))
    }

    pub fn with_owner(mut self, owner: DocumentOwner) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl Endpoint for ListDocumentsParams {
    type Output = DocumentResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path_segments(&self) -> Result<Vec<String>, ApiError> {
        self.owner()?.path_segments()
    }

    fn bags(&self) -> &ParamBags {
        &self.bags
    }

    fn check_required(&self) -> Result<(), ApiError> {
        self.owner().map(|_| ())
    }

    fn decode(body: &str) -> Result<DocumentResponse, ApiError> {
        decode_one(body, "documents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;

    fn base() -> Url {
        Url::parse("https://inference.eu-west-1.dataleon.ai").unwrap()
    }

    fn acme() -> CompanyInfo {
        let mut info = CompanyInfo::new();
        info.set_name("ACME Corp").set_country("FR");
        info
    }

    #[test]
    fn test_create_company_body_and_url() {
        let params = CreateCompanyParams::new()
            .with_company(acme())
            .with_workspace_id("wk_123");

        assert_eq!(
            params.json_body().unwrap(),
            Some(json!({
                "company": { "name": "ACME Corp", "country": "FR" },
                "workspace_id": "wk_123"
            }))
        );
        let url = params.request_url(&base()).unwrap();
        assert!(url.as_str().ends_with("/companies"), "{}", url);
        assert_eq!(params.method(), Method::POST);
    }

    #[test]
    fn test_create_company_full_registry_body() {
        let mut info = acme();
        info.set_address("123 rue Exemple, Paris")
            .set_commercial_name("ACME")
            .set_email("info@acme.fr")
            .set_employer_identification_number("EIN123456")
            .set_legal_form("SARL")
            .set_phone_number("+33 1 23 45 67 89")
            .set_registration_date(NaiveDate::from_ymd_opt(2010, 5, 15).unwrap())
            .set_registration_id("RCS123456")
            .set_share_capital("100000")
            .set_status("active")
            .set_tax_identification_number("FR123456789")
            .set_company_type("main")
            .set_website_url("https://acme.fr");
        let mut technical = TechnicalData::new();
        technical
            .set_callback_url("https://hooks.example.com/kyc")
            .set_language("fra");

        let body = CreateCompanyParams::new()
            .with_company(info)
            .with_workspace_id("wk_123")
            .with_source_id("crm-42")
            .with_technical_data(technical)
            .json_body()
            .unwrap()
            .unwrap();

        assert_eq!(body["company"]["address"], "123 rue Exemple, Paris");
        assert_eq!(body["company"]["share_capital"], "100000");
        assert_eq!(body["company"]["registration_id"], "RCS123456");
        assert_eq!(body["company"]["registration_date"], "2010-05-15");
        assert_eq!(body["company"]["type"], "main");
        assert_eq!(body["source_id"], "crm-42");
        assert_eq!(body["technical_data"]["callback_url"], "https://hooks.example.com/kyc");
    }

    #[test]
    fn test_create_company_missing_fields_are_named() {
        let no_company = CreateCompanyParams::new().with_workspace_id("wk_123");
        assert_eq!(
            no_company.json_body().unwrap_err(),
            ApiError::MissingArgument("company".to_string())
        );

        let no_workspace = CreateCompanyParams::new().with_company(acme());
        assert_eq!(
            no_workspace.json_body().unwrap_err(),
            ApiError::MissingArgument("workspace_id".to_string())
        );

        let mut nameless = CompanyInfo::new();
        nameless.set_country("FR");
        let no_name = CreateCompanyParams::new()
            .with_company(nameless)
            .with_workspace_id("wk_123");
        assert_eq!(
            no_name.json_body().unwrap_err(),
            ApiError::MissingArgument("company.name".to_string())
        );
    }

    #[test]
    fn test_path_id_is_required_and_encoded() {
        let missing = RetrieveCompanyParams::new();
        assert_eq!(
            missing.request_url(&base()).unwrap_err(),
            ApiError::MissingArgument("id".to_string())
        );

        let empty = DeleteIndividualParams::new().with_id("");
        assert_eq!(
            empty.json_body().unwrap_err(),
            ApiError::MissingArgument("id".to_string())
        );

        let params = RetrieveCompanyParams::new().with_id("cmp/1 2");
        assert_eq!(
            params.request_url(&base()).unwrap().as_str(),
            "https://inference.eu-west-1.dataleon.ai/companies/cmp%2F1%202"
        );
    }

    #[test]
    fn test_retrieve_query_flags() {
        let params = RetrieveIndividualParams::new()
            .with_id("ind_1")
            .with_document(true)
            .with_scope("id");
        assert_eq!(
            params.request_url(&base()).unwrap().as_str(),
            "https://inference.eu-west-1.dataleon.ai/individuals/ind_1?document=true&scope=id"
        );
        assert_eq!(params.document().unwrap(), Some(true));
    }

    #[test]
    fn test_list_query_only_populated_entries() {
        let params = ListCompaniesParams::new()
            .with_workspace_id("wk_123")
            .with_limit(10);
        assert_eq!(
            params.request_url(&base()).unwrap().as_str(),
            "https://inference.eu-west-1.dataleon.ai/companies?workspace_id=wk_123&limit=10"
        );

        let bare = ListIndividualsParams::new();
        assert_eq!(
            bare.request_url(&base()).unwrap().as_str(),
            "https://inference.eu-west-1.dataleon.ai/individuals"
        );
        assert_eq!(bare.json_body().unwrap(), None);
    }

    #[test]
    fn test_list_filters_render_wire_values() {
        let params = ListIndividualsParams::new()
            .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .with_end_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            .with_state(VerificationState::Processed)
            .with_status(VerificationStatus::NeedReview)
            .with_source_id("crm-42")
            .with_offset(20);

        assert_eq!(
            params.bags().query_pairs(),
            vec![
                ("start_date".to_string(), "2024-01-01".to_string()),
                ("end_date".to_string(), "2024-01-31".to_string()),
                ("state".to_string(), "PROCESSED".to_string()),
                ("status".to_string(), "need_review".to_string()),
                ("source_id".to_string(), "crm-42".to_string()),
                ("offset".to_string(), "20".to_string()),
            ]
        );
        assert_eq!(params.status().unwrap(), Some(VerificationStatus::NeedReview));
    }

    #[test]
    fn test_query_value_rendering() {
        let mut bags = ParamBags::default();
        bags.query_mut()
            .set("flag", true)
            .set("skip", Value::Null)
            .set("nested", json!({ "a": 1 }))
            .set("state", json!(["WAITING", "RUNNING"]))
            .set("score", 0.5);

        assert_eq!(
            bags.query_pairs(),
            vec![
                ("flag".to_string(), "true".to_string()),
                ("state".to_string(), "WAITING".to_string()),
                ("state".to_string(), "RUNNING".to_string()),
                ("score".to_string(), "0.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_headers_replace_case_insensitively() {
        let params = CreateCompanyParams::new()
            .header("X-Request-Id", "first")
            .header("x-request-id", "second")
            .header("X-Trace", "abc");

        assert_eq!(params.bags().header("X-REQUEST-ID"), Some("second"));
        assert_eq!(params.bags().headers().len(), 2);
    }

    #[test]
    fn test_update_company_requires_company_and_workspace() {
        let missing_company = UpdateCompanyParams::new()
            .with_id("cmp_1")
            .with_workspace_id("wk_123");
        assert_eq!(
            missing_company.json_body().unwrap_err(),
            ApiError::MissingArgument("company".to_string())
        );

        let missing_workspace = UpdateCompanyParams::new().with_id("cmp_1").with_company(acme());
        assert_eq!(
            missing_workspace.json_body().unwrap_err(),
            ApiError::MissingArgument("workspace_id".to_string())
        );

        let params = UpdateCompanyParams::new()
            .with_id("cmp_1")
            .with_company(acme())
            .with_workspace_id("wk_123");
        assert_eq!(params.method(), Method::PUT);
        assert_eq!(
            params.json_body().unwrap(),
            Some(json!({
                "company": { "name": "ACME Corp", "country": "FR" },
                "workspace_id": "wk_123"
            }))
        );
    }

    #[test]
    fn test_individual_writes_require_workspace_only() {
        let create = CreateIndividualParams::new().with_workspace_id("wk_123");
        assert_eq!(create.json_body().unwrap(), Some(json!({ "workspace_id": "wk_123" })));

        assert_eq!(
            CreateIndividualParams::new().json_body().unwrap_err(),
            ApiError::MissingArgument("workspace_id".to_string())
        );

        let update = UpdateIndividualParams::new().with_id("ind_1");
        assert_eq!(
            update.json_body().unwrap_err(),
            ApiError::MissingArgument("workspace_id".to_string())
        );
    }

    #[test]
    fn test_upload_document_paths_and_requirements() {
        let params = UploadDocumentParams::new()
            .with_owner(DocumentOwner::Individual("ind_9".into()))
            .with_document_type(DocumentType::Passport)
            .with_file_bytes(b"hello");

        assert_eq!(
            params.request_url(&base()).unwrap().as_str(),
            "https://inference.eu-west-1.dataleon.ai/individuals/ind_9/documents"
        );
        assert_eq!(
            params.json_body().unwrap(),
            Some(json!({ "document_type": "passport", "file": "aGVsbG8=" }))
        );

        let no_type = UploadDocumentParams::new()
            .with_owner(DocumentOwner::Company("cmp_1".into()));
        assert_eq!(
            no_type.json_body().unwrap_err(),
            ApiError::MissingArgument("document_type".to_string())
        );

        let no_owner = UploadDocumentParams::new().with_document_type(DocumentType::Rib);
        assert_eq!(
            no_owner.json_body().unwrap_err(),
            ApiError::MissingArgument("owner".to_string())
        );
    }

    #[test]
    fn test_upload_body_uses_document_type_key() {
        let params = UploadDocumentParams::new()
            .with_owner(DocumentOwner::Company("cmp_1".into()))
            .with_document_type("kbis")
            .with_url("https://x/y.pdf");

        let body = params.json_body().unwrap().unwrap();
        assert_eq!(body, json!({ "document_type": "kbis", "url": "https://x/y.pdf" }));
        assert!(body.get("type").is_none());
        assert_eq!(params.document_type().unwrap(), DocumentType::Kbis);
    }

    #[test]
    fn test_upload_allows_both_file_and_url() {
        let params = UploadDocumentParams::new()
            .with_owner(DocumentOwner::Company("cmp_1".into()))
            .with_document_type(DocumentType::ProofOfAddress)
            .with_file("Zm9v")
            .with_url("https://files.example.com/a.pdf");
        assert!(params.json_body().is_ok());

        let neither = UploadDocumentParams::new()
            .with_owner(DocumentOwner::Company("cmp_1".into()))
            .with_document_type(DocumentType::ProofOfAddress);
        assert!(neither.json_body().is_ok());
    }

    #[test]
    fn test_list_documents_decodes_response_with_total() {
        let params = ListDocumentsParams::new().with_owner(DocumentOwner::Company("cmp_1".into()));
        assert_eq!(
            params.request_url(&base()).unwrap().as_str(),
            "https://inference.eu-west-1.dataleon.ai/companies/cmp_1/documents"
        );

        let response = ListDocumentsParams::decode(
            r#"{"documents":[{"id":"a","document_type":"kbis"}],"total_document":2}"#,
        )
        .unwrap();
        assert_eq!(response.total_document().unwrap(), Some(2));
        assert_eq!(response.documents().unwrap().unwrap().len(), 1);
        assert!(response.unknown_fields().is_empty());
    }
}
