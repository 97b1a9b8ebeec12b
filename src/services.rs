use crate::errors::ApiError;
use crate::models::*;
use crate::params::*;
use crate::transport::ApiTransport;

/// Operations on `/companies`.
#[derive(Debug, Clone)]
pub struct CompanyService {
    transport: ApiTransport,
}

impl CompanyService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Creates a company and returns it as stored by the API.
    pub async fn create(&self, params: &CreateCompanyParams) -> Result<Company, ApiError> {
        let company = self.transport.execute(params).await?;
        tracing::info!(source_id = ?company.source_id().ok().flatten(), "Company created");
        Ok(company)
    }

    pub async fn retrieve(&self, params: &RetrieveCompanyParams) -> Result<Company, ApiError> {
        self.transport.execute(params).await
    }

    /// Replaces the company's registry block; `company` and `workspace_id`
    /// are both required.
    pub async fn update(&self, params: &UpdateCompanyParams) -> Result<Company, ApiError> {
        self.transport.execute(params).await
    }

    /// Lists companies in response order. Paging is the caller's business
    /// through `offset`/`limit`.
    pub async fn list(&self, params: &ListCompaniesParams) -> Result<Vec<Company>, ApiError> {
        let companies = self.transport.execute(params).await?;
        tracing::debug!(count = companies.len(), "Listed companies");
        Ok(companies)
    }

    pub async fn delete(&self, params: &DeleteCompanyParams) -> Result<(), ApiError> {
        self.transport.execute(params).await?;
        tracing::info!(id = params.id().unwrap_or_default(), "Company deleted");
        Ok(())
    }

    /// Documents of one company.
    pub fn documents(&self, company_id: impl Into<String>) -> OwnerDocuments {
        OwnerDocuments::new(
            DocumentService::new(self.transport.clone()),
            DocumentOwner::Company(company_id.into()),
        )
    }
}

/// Operations on `/individuals`.
#[derive(Debug, Clone)]
pub struct IndividualService {
    transport: ApiTransport,
}

impl IndividualService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn create(&self, params: &CreateIndividualParams) -> Result<Individual, ApiError> {
        let individual = self.transport.execute(params).await?;
        tracing::info!(id = ?individual.id().ok().flatten(), "Individual created");
        Ok(individual)
    }

    pub async fn retrieve(
        &self,
        params: &RetrieveIndividualParams,
    ) -> Result<Individual, ApiError> {
        self.transport.execute(params).await
    }

    pub async fn update(&self, params: &UpdateIndividualParams) -> Result<Individual, ApiError> {
        self.transport.execute(params).await
    }

    pub async fn list(
        &self,
        params: &ListIndividualsParams,
    ) -> Result<Vec<Individual>, ApiError> {
        let individuals = self.transport.execute(params).await?;
        tracing::debug!(count = individuals.len(), "Listed individuals");
        Ok(individuals)
    }

    pub async fn delete(&self, params: &DeleteIndividualParams) -> Result<(), ApiError> {
        self.transport.execute(params).await?;
        tracing::info!(id = params.id().unwrap_or_default(), "Individual deleted");
        Ok(())
    }

    /// Documents of one individual.
    pub fn documents(&self, individual_id: impl Into<String>) -> OwnerDocuments {
        OwnerDocuments::new(
            DocumentService::new(self.transport.clone()),
            DocumentOwner::Individual(individual_id.into()),
        )
    }
}

/// Documents attached to a company or an individual.
#[derive(Debug, Clone)]
pub struct DocumentService {
    transport: ApiTransport,
}

impl DocumentService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Uploads a document, either inline (`file`) or by reference (`url`).
    /// Extraction runs server-side; poll the owner's documents for status.
    pub async fn upload(&self, params: &UploadDocumentParams) -> Result<GenericDocument, ApiError> {
        let document = self.transport.execute(params).await?;
        tracing::info!(
            id = ?document.id().ok().flatten(),
            state = ?document.state().ok().flatten(),
            "Document uploaded"
        );
        Ok(document)
    }

    pub async fn list(&self, params: &ListDocumentsParams) -> Result<DocumentResponse, ApiError> {
        let response: DocumentResponse = self.transport.execute(params).await?;
        tracing::debug!(
            total = ?response.total_document().ok().flatten(),
            "Listed documents"
        );
        Ok(response)
    }
}

/// [`DocumentService`] bound to one owner.
#[derive(Debug, Clone)]
pub struct OwnerDocuments {
    service: DocumentService,
    owner: DocumentOwner,
}

impl OwnerDocuments {
    pub fn new(service: DocumentService, owner: DocumentOwner) -> Self {
        Self { service, owner }
    }

    pub fn owner(&self) -> &DocumentOwner {
        &self.owner
    }

    /// Uploads with the bound owner, replacing any owner set on `params`.
    pub async fn upload(&self, params: UploadDocumentParams) -> Result<GenericDocument, ApiError> {
        let params = params.with_owner(self.owner.clone());
        self.service.upload(&params).await
    }

    pub async fn list(&self) -> Result<DocumentResponse, ApiError> {
        let params = ListDocumentsParams::new().with_owner(self.owner.clone());
        self.service.list(&params).await
    }
}
