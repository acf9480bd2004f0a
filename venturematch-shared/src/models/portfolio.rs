use serde::{Deserialize, Serialize};

use super::lenient;
use crate::resource::{Resource, first_blank};

/// A past investment listed in an investor's portfolio.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", remote = "Self")]
pub struct InvestmentPortfolio {
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub portfolio_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub invested_company_name: String,
    /// ISO date of the investment (`YYYY-MM-DD`).
    #[serde(default, deserialize_with = "lenient::string_or_default")]
    pub investment_date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub investor_id: Option<i64>,
}

lenient::wire_keys!(InvestmentPortfolio {
    "portfolioId" <- ["portfolio_id", "id"],
    "investorId" <- ["investor_id"],
});

/// Create/edit form for [`InvestmentPortfolio`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDraft {
    pub invested_company_name: String,
    pub investment_date: String,
    pub description: String,
}

impl Resource for InvestmentPortfolio {
    type Draft = PortfolioDraft;

    const NAME: &'static str = "investment portfolio";
    const COLLECTION_PATH: &'static str = "/investment-portfolios";

    fn id(&self) -> Option<i64> {
        self.portfolio_id
    }

    fn label(&self) -> String {
        self.invested_company_name.clone()
    }

    fn missing_field(draft: &Self::Draft) -> Option<&'static str> {
        first_blank(&[
            ("invested company name", draft.invested_company_name.as_str()),
            ("investment date", draft.investment_date.as_str()),
        ])
    }

    fn to_draft(&self) -> Self::Draft {
        PortfolioDraft {
            invested_company_name: self.invested_company_name.clone(),
            investment_date: self.investment_date.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_uses_camel_case_on_the_wire() {
        let portfolio: InvestmentPortfolio = serde_json::from_str(
            r#"{"portfolioId":2,"investedCompanyName":"Acme","investmentDate":"2023-05-01","investorId":4}"#,
        )
        .unwrap();
        assert_eq!(portfolio.id(), Some(2));
        assert_eq!(portfolio.investor_id, Some(4));

        let json = serde_json::to_value(portfolio.to_draft()).unwrap();
        assert_eq!(json["investedCompanyName"], "Acme");
        assert_eq!(json["investmentDate"], "2023-05-01");
        assert_eq!(json["description"], "");
    }

    #[test]
    fn portfolio_tolerates_mixed_keys_and_nulls() {
        let portfolio: InvestmentPortfolio = serde_json::from_str(
            r#"{"id":9,"portfolio_id":2,"investedCompanyName":null,"investor_id":"4","investorId":null}"#,
        )
        .unwrap();
        assert_eq!(portfolio.portfolio_id, Some(2));
        assert_eq!(portfolio.investor_id, Some(4));
        assert_eq!(portfolio.invested_company_name, "");
    }

    #[test]
    fn description_is_optional() {
        let draft = PortfolioDraft {
            invested_company_name: "Acme".into(),
            investment_date: "2023-05-01".into(),
            description: String::new(),
        };
        assert_eq!(InvestmentPortfolio::missing_field(&draft), None);
    }
}
