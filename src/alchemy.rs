use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    chain::StringExt,
    network::Network,
    Reqwest,
};

#[derive(Serialize, Deserialize, Debug)]
pub struct OwnersPage {
    pub owners: Vec<String>,
    #[serde(rename = "pageKey")]
    pub page_key: Option<String>,
}

pub struct Alchemy;

impl Alchemy {
    // docs: https://docs.alchemy.com/reference/getownersforcontract-v3
    pub async fn get_owners_for_contract(
        network: &Network,
        api_key: &str,
        contract: Address,
    ) -> crate::Result<Vec<Address>> {
        let base = network.get_nft_api(api_key)?;

        let mut owners = Vec::new();
        let mut page_key: Option<String> = None;
        loop {
            let mut query = vec![("contractAddress", contract.to_string())];
            if let Some(key) = page_key.take() {
                query.push(("pageKey", key));
            }

            let page = Reqwest::get(format!("{base}/getOwnersForContract"))?
                .query(&query)
                .receive_json::<OwnersPage>()
                .await?;

            for owner in &page.owners {
                owners.push(owner.parse_as_address()?);
            }

            page_key = page.page_key;
            if page_key.is_none() {
                break;
            }
        }

        Ok(owners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owners_page_parses() {
        let page: OwnersPage = serde_json::from_str(
            r#"{"owners":["0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d"],"pageKey":"abc"}"#,
        )
        .unwrap();
        assert_eq!(page.owners.len(), 1);
        assert_eq!(page.page_key.as_deref(), Some("abc"));

        let page: OwnersPage = serde_json::from_str(r#"{"owners":[]}"#).unwrap();
        assert!(page.owners.is_empty());
        assert!(page.page_key.is_none());
    }
}
