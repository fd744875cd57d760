// src/models/api.rs

//! Wire types for the product query endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request body for one page of one catalog.
///
/// Field names mirror the endpoint's camelCase payload. All filters stay at
/// their neutral values; only the catalog id and page number vary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub keyword: String,
    pub catalog_id_list: Vec<u32>,
    pub brand_id_list: Vec<u32>,
    pub encap_value_list: Vec<String>,
    pub is_stock: bool,
    pub is_other_suppliers: bool,
    pub is_asian_brand: bool,
    pub is_deals: bool,
    pub is_environment: bool,
    pub param_name_value_map: BTreeMap<String, String>,
    pub current_page: u32,
    pub page_size: u32,
}

impl QueryRequest {
    /// Fixed page size used for every query.
    pub const PAGE_SIZE: u32 = 25;

    /// Build the request for one catalog page.
    pub fn for_page(catalog_id: u32, page: u32) -> Self {
        Self {
            keyword: String::new(),
            catalog_id_list: vec![catalog_id],
            brand_id_list: Vec::new(),
            encap_value_list: Vec::new(),
            is_stock: false,
            is_other_suppliers: false,
            is_asian_brand: false,
            is_deals: false,
            is_environment: false,
            param_name_value_map: BTreeMap::new(),
            current_page: page,
            page_size: Self::PAGE_SIZE,
        }
    }
}

/// Response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub result: Option<QueryResult>,
}

/// Payload inside the envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    pub total_page: Option<u32>,
    pub data_list: Option<Vec<ApiProduct>>,
}

/// One raw item from `dataList`.
///
/// Every field is optional; the endpoint omits or nulls fields freely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiProduct {
    pub product_model: Option<String>,
    pub product_code: Option<String>,
    pub brand_name_en: Option<String>,
    pub product_intro_en: Option<String>,
    pub product_name_en: Option<String>,
    pub first_wm_catalog_name_en: Option<String>,
    pub second_wm_catalog_name_en: Option<String>,
    pub third_wm_catalog_name_en: Option<String>,
    pub wm_catalog_name_en: Option<String>,
    pub encap_standard: Option<String>,
    pub encap_en: Option<String>,
    pub encap: Option<String>,
    pub package_en: Option<String>,
    #[serde(rename = "paramVOList")]
    pub param_vo_list: Option<Vec<ParamVo>>,
}

/// One auxiliary parameter name/value pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamVo {
    pub param_name_en: Option<String>,
    pub param_name: Option<String>,
    pub param_value_en: Option<String>,
    pub param_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = QueryRequest::for_page(874, 3);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["keyword"], "");
        assert_eq!(json["catalogIdList"][0], 874);
        assert_eq!(json["currentPage"], 3);
        assert_eq!(json["pageSize"], 25);
        assert_eq!(json["isStock"], false);
        assert!(json["paramNameValueMap"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.result.is_none());

        let response: QueryResponse =
            serde_json::from_str(r#"{"result": {"totalPage": 7, "dataList": null}}"#).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result.total_page, Some(7));
        assert!(result.data_list.is_none());
    }

    #[test]
    fn test_item_param_list_rename() {
        let raw = r#"{
            "productModel": "BSS138-7-F",
            "productCode": "C40912",
            "brandNameEn": "DIODES",
            "paramVOList": [{"paramNameEn": "Vds", "paramValueEn": "50V"}]
        }"#;
        let item: ApiProduct = serde_json::from_str(raw).unwrap();
        assert_eq!(item.product_code.as_deref(), Some("C40912"));
        let params = item.param_vo_list.unwrap();
        assert_eq!(params[0].param_name_en.as_deref(), Some("Vds"));
    }
}
