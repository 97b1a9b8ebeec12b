//! Open enums mirrored from the API.
//!
//! The server is free to add values at any time, so every enum keeps
//! unrecognized strings as `Other(String)` instead of failing to decode.

use crate::fields::open_enum;

open_enum! {
    /// Review outcome of an AML suspicion.
    pub enum AmlSuspicionStatus {
        TruePositive => "true_positive",
        FalsePositive => "false_positive",
        Pending => "pending",
    }
}

open_enum! {
    /// Category of an AML screening match.
    pub enum AmlSuspicionType {
        Crime => "crime",
        Sanction => "sanction",
        Pep => "pep",
        AdverseNews => "adverse_news",
        Unclassified => "other",
    }
}

open_enum! {
    /// Where a [`Member`](crate::models::Member) record came from.
    pub enum MemberSource {
        /// Government registry.
        Gouve => "gouve",
        User => "user",
        Company => "company",
    }
}

open_enum! {
    /// Discriminates a [`Member`](crate::models::Member).
    pub enum MemberType {
        Person => "person",
        Company => "company",
    }
}

open_enum! {
    /// Workflow state of a company or individual, used as a list filter.
    pub enum VerificationState {
        Void => "VOID",
        Waiting => "WAITING",
        Started => "STARTED",
        Running => "RUNNING",
        Processed => "PROCESSED",
        Failed => "FAILED",
        Aborted => "ABORTED",
        Expired => "EXPIRED",
        Deleted => "DELETED",
    }
}

open_enum! {
    /// Review decision on a company or individual, used as a list filter.
    pub enum VerificationStatus {
        Rejected => "rejected",
        NeedReview => "need_review",
        Approved => "approved",
    }
}

open_enum! {
    pub enum Gender {
        Male => "M",
        Female => "F",
    }
}

open_enum! {
    /// Classification required when uploading a document.
    pub enum DocumentType {
        LiasseFiscale => "liasse_fiscale",
        AmortisedLoanSchedule => "amortised_loan_schedule",
        Invoice => "invoice",
        Receipt => "receipt",
        CompanyStatuts => "company_statuts",
        RegistrationCompanyCertificate => "registration_company_certificate",
        Kbis => "kbis",
        Rib => "rib",
        LivretFamille => "livret_famille",
        BirthCertificate => "birth_certificate",
        Payslip => "payslip",
        SocialSecurityCard => "social_security_card",
        VehicleRegistrationCertificate => "vehicle_registration_certificate",
        CarteGrise => "carte_grise",
        CriminalRecordExtract => "criminal_record_extract",
        ProofOfAddress => "proof_of_address",
        IdentityCardFront => "identity_card_front",
        IdentityCardBack => "identity_card_back",
        DriverLicenseFront => "driver_license_front",
        DriverLicenseBack => "driver_license_back",
        IdentityDocument => "identity_document",
        DriverLicense => "driver_license",
        Passport => "passport",
        Tax => "tax",
        CertificateOfIncorporation => "certificate_of_incorporation",
        CertificateOfGoodStanding => "certificate_of_good_standing",
        LcbFtLabAmlPolicies => "lcb_ft_lab_aml_policies",
        NiuEntreprise => "niu_entreprise",
        FinancialStatements => "financial_statements",
        Rccm => "rccm",
        ProofOfSourceFunds => "proof_of_source_funds",
        OrganizationalChart => "organizational_chart",
        RiskPolicies => "risk_policies",
    }
}
