//! Catalog normalization tests
//!
//! Tests for the wire-to-domain product conversion:
//! - Price resolution across the backend's inconsistent fields
//! - Badge derivation for donations and offers
//! - Image URL normalization

use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::product::{filter_catalog, ApiProduct, Product};
use shared::types::{Badge, StoreId};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn api_product(name: &str) -> ApiProduct {
    ApiProduct {
        id_producto: 1,
        nombre: name.to_string(),
        descripcion: None,
        imagen_url: None,
        precio_original: None,
        precio_descuento: None,
        precio: None,
        fecha_vencimiento: None,
        stock: None,
        badge: None,
        id_categoria: None,
        nombre_categoria: None,
        nombre_tienda: Some("Panadería El Trigo".to_string()),
        id_tienda: Some(4),
    }
}

const ASSETS: &str = "http://localhost:8081";

mod unit_tests {
    use super::*;

    #[test]
    fn explicit_price_pair_is_respected() {
        let mut api = api_product("Pan Artesanal");
        api.precio_original = Some(dec("3000"));
        api.precio_descuento = Some(dec("1500"));

        let product = Product::from_api(api, ASSETS);
        assert_eq!(product.price, dec("1500"));
        assert_eq!(product.original_price, dec("3000"));
        assert_eq!(product.badge, Some(Badge::Offer));
        assert_eq!(product.store_id, Some(StoreId(4)));
    }

    #[test]
    fn single_price_derives_original_with_markup() {
        let mut api = api_product("Leche Entera");
        api.precio = Some(dec("2000"));

        let product = Product::from_api(api, ASSETS);
        assert_eq!(product.price, dec("2000"));
        // 2000 × 1.35 = 2700
        assert_eq!(product.original_price, dec("2700"));
    }

    #[test]
    fn derived_original_rounds_half_up() {
        let mut api = api_product("Yogurt");
        api.precio = Some(dec("999"));

        let product = Product::from_api(api, ASSETS);
        // 999 × 1.35 = 1348.65 → 1349
        assert_eq!(product.original_price, dec("1349"));
    }

    #[test]
    fn zero_price_is_a_donation() {
        let mut api = api_product("Manzanas");
        api.precio = Some(Decimal::ZERO);

        let product = Product::from_api(api, ASSETS);
        assert!(product.is_donation());
        assert_eq!(product.price, Decimal::ZERO);
    }

    #[test]
    fn backend_badge_wins_over_derivation() {
        let mut api = api_product("Canasta");
        api.precio = Some(dec("1000"));
        api.badge = Some("Donación".to_string());

        let product = Product::from_api(api, ASSETS);
        assert_eq!(product.badge, Some(Badge::Donation));
    }

    #[test]
    fn relative_image_paths_are_prefixed_and_normalized() {
        let mut api = api_product("Pan");
        api.imagen_url = Some(r"uploads\productos\pan.jpg".to_string());

        let product = Product::from_api(api, ASSETS);
        assert_eq!(
            product.image_url,
            "http://localhost:8081/uploads/productos/pan.jpg"
        );
    }

    #[test]
    fn absolute_image_urls_pass_through() {
        let mut api = api_product("Pan");
        api.imagen_url = Some("https://images.example.com/pan.jpg".to_string());

        let product = Product::from_api(api, ASSETS);
        assert_eq!(product.image_url, "https://images.example.com/pan.jpg");
    }

    #[test]
    fn missing_image_becomes_a_placeholder() {
        let product = Product::from_api(api_product("Pan Integral"), ASSETS);
        assert!(product.image_url.starts_with("https://placehold.co/"));
        assert!(product.image_url.contains("Pan"));
    }

    #[test]
    fn expiry_dates_parse_both_wire_formats() {
        let mut api = api_product("Pan");
        api.fecha_vencimiento = Some("2024-10-25".to_string());
        let product = Product::from_api(api, ASSETS);
        assert_eq!(
            product.expiry_date,
            chrono::NaiveDate::from_ymd_opt(2024, 10, 25)
        );

        let mut api = api_product("Pan");
        api.fecha_vencimiento = Some("2024-10-25T12:30:00Z".to_string());
        let product = Product::from_api(api, ASSETS);
        assert_eq!(
            product.expiry_date,
            chrono::NaiveDate::from_ymd_opt(2024, 10, 25)
        );
    }

    #[test]
    fn missing_store_name_gets_the_unknown_location() {
        let mut api = api_product("Pan");
        api.nombre_tienda = None;
        let product = Product::from_api(api, ASSETS);
        assert_eq!(product.location, "Ubicación Desconocida");
    }

    #[test]
    fn backend_rows_deserialize_with_spanish_field_names() {
        let raw = r#"{
            "id_producto": 12,
            "nombre": " Pan Artesanal ",
            "descripcion": "Pan de masa madre",
            "imagen_url": "uploads/pan.jpg",
            "precio_original": 3000,
            "precio_descuento": 1500,
            "fecha_vencimiento": "2024-12-25",
            "stock": 5,
            "id_categoria": 2,
            "nombre_categoria": "Panadería",
            "nombre_tienda": "Panadería El Trigo",
            "id_tienda": 4
        }"#;

        let api: ApiProduct = serde_json::from_str(raw).unwrap();
        let product = Product::from_api(api, ASSETS);

        assert_eq!(product.name, "Pan Artesanal");
        assert_eq!(product.price, dec("1500"));
        assert_eq!(product.stock, Some(5));
        assert_eq!(product.category.as_deref(), Some("Panadería"));
        assert_eq!(product.store_id, Some(StoreId(4)));
    }

    #[test]
    fn catalog_filter_matches_search_and_donations() {
        let mut donation = api_product("Manzanas Orgánicas");
        donation.precio = Some(Decimal::ZERO);
        let mut offer = api_product("Pan Artesanal");
        offer.precio = Some(dec("1500"));

        let products = vec![
            Product::from_api(donation, ASSETS),
            Product::from_api(offer, ASSETS),
        ];

        let all = filter_catalog(&products, "", false);
        assert_eq!(all.len(), 2);

        let donations = filter_catalog(&products, "", true);
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].name, "Manzanas Orgánicas");

        let search = filter_catalog(&products, "pan", false);
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].name, "Pan Artesanal");
    }
}
