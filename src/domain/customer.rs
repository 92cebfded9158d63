use crate::domain::model::Record;
use crate::utils::error::{ChurnError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const MAX_TENURE_MONTHS: u32 = 240;
pub const MAX_MONTHLY_CHARGES: f64 = 3000.0;

/// 定義類別欄位：每個 variant 對應模型詞彙表中的字串值
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident { $first:ident => $first_value:literal $(, $variant:ident => $value:literal)* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
        pub enum $name {
            #[serde(rename = $first_value)]
            #[cfg_attr(feature = "cli", value(name = $first_value))]
            $first,
            $(
                #[serde(rename = $value)]
                #[cfg_attr(feature = "cli", value(name = $value))]
                $variant,
            )*
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::$first => $first_value,
                    $(Self::$variant => $value,)*
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical!(Gender { Male => "male", Female => "female" });

categorical!(YesNo { Yes => "yes", No => "no" });

categorical!(MultipleLines {
    Yes => "yes",
    No => "no",
    NoPhoneService => "no_phone_service",
});

categorical!(InternetService {
    Dsl => "dsl",
    No => "no",
    FiberOptic => "fiber_optic",
});

categorical!(
    /// Add-on services that only exist with an internet subscription.
    InternetAddon {
        Yes => "yes",
        No => "no",
        NoInternetService => "no_internet_service",
    }
);

categorical!(Contract {
    MonthToMonth => "month-to-month",
    OneYear => "one_year",
    TwoYear => "two_year",
});

categorical!(PaymentMethod {
    BankTransfer => "bank_transfer_(automatic)",
    CreditCard => "credit_card_(automatic)",
    ElectronicCheck => "electronic_check",
    MailedCheck => "mailed_check",
});

/// Attributes of a single customer for an online prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct CustomerProfile {
    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub gender: Gender,

    #[cfg_attr(
        feature = "cli",
        arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))
    )]
    pub seniorcitizen: u8,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub partner: YesNo,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub dependents: YesNo,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub phoneservice: YesNo,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub multiplelines: MultipleLines,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub internetservice: InternetService,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub onlinesecurity: InternetAddon,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub onlinebackup: InternetAddon,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub deviceprotection: InternetAddon,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub techsupport: InternetAddon,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub streamingtv: InternetAddon,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub streamingmovies: InternetAddon,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub contract: Contract,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub paperlessbilling: YesNo,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t))]
    pub paymentmethod: PaymentMethod,

    /// Tenure in months (0-240)
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 0))]
    pub tenure: u32,

    /// Monthly charges in dollars (0-3000)
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 0.0))]
    pub monthlycharges: f64,

    /// Total charges in dollars, defaults to tenure * monthly charges
    #[cfg_attr(feature = "cli", arg(long))]
    pub totalcharges: Option<f64>,
}

impl CustomerProfile {
    pub fn effective_total_charges(&self) -> f64 {
        self.totalcharges
            .unwrap_or(self.tenure as f64 * self.monthlycharges)
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("gender", json!(self.gender.as_str()));
        record.insert("seniorcitizen", json!(self.seniorcitizen));
        record.insert("partner", json!(self.partner.as_str()));
        record.insert("dependents", json!(self.dependents.as_str()));
        record.insert("phoneservice", json!(self.phoneservice.as_str()));
        record.insert("multiplelines", json!(self.multiplelines.as_str()));
        record.insert("internetservice", json!(self.internetservice.as_str()));
        record.insert("onlinesecurity", json!(self.onlinesecurity.as_str()));
        record.insert("onlinebackup", json!(self.onlinebackup.as_str()));
        record.insert("deviceprotection", json!(self.deviceprotection.as_str()));
        record.insert("techsupport", json!(self.techsupport.as_str()));
        record.insert("streamingtv", json!(self.streamingtv.as_str()));
        record.insert("streamingmovies", json!(self.streamingmovies.as_str()));
        record.insert("contract", json!(self.contract.as_str()));
        record.insert("paperlessbilling", json!(self.paperlessbilling.as_str()));
        record.insert("paymentmethod", json!(self.paymentmethod.as_str()));
        record.insert("tenure", json!(self.tenure));
        record.insert("monthlycharges", json!(self.monthlycharges));
        record.insert("totalcharges", json!(self.effective_total_charges()));
        record
    }
}

impl Validate for CustomerProfile {
    fn validate(&self) -> Result<()> {
        validate_range("seniorcitizen", self.seniorcitizen, 0, 1)?;
        validate_range("tenure", self.tenure, 0, MAX_TENURE_MONTHS)?;
        validate_range("monthlycharges", self.monthlycharges, 0.0, MAX_MONTHLY_CHARGES)?;

        let total = self.effective_total_charges();
        if !total.is_finite() {
            return Err(ChurnError::ValidationError {
                message: format!("totalcharges must be a finite number, got {}", total),
            });
        }
        Ok(())
    }
}
