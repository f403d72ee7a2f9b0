//! CSV-backed restaurant and menu catalog
//!
//! The catalog is read on first use and kept for the life of the process.
//! Admins and owners may edit it afterwards; edits are not written back.
//! Rows that fail to parse are skipped with a warning; a missing or empty
//! file surfaces as [`ErrorCode::CatalogUnavailable`].

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult, ErrorCode};
use parking_lot::RwLock;
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, Restaurant, RestaurantFilter, RestaurantUpdate,
};
use tokio::sync::OnceCell;

const EMBEDDED_RESTAURANTS: &str = include_str!("../data/restaurants.csv");
const EMBEDDED_MENU: &str = include_str!("../data/menu.csv");

/// Where catalog CSV text comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Files compiled into the binary
    Embedded,
    /// `restaurants.csv` and `menu.csv` inside a directory
    Directory(PathBuf),
}

#[derive(Debug, Default)]
struct CatalogData {
    restaurants: Vec<Restaurant>,
    menu: Vec<MenuItem>,
}

impl CatalogData {
    fn restaurant_mut(&mut self, id: &str) -> AppResult<&mut Restaurant> {
        self.restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| restaurant_not_found(id))
    }

    fn menu_item_mut(&mut self, id: &str) -> AppResult<&mut MenuItem> {
        self.menu
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| menu_item_not_found(id))
    }

    /// One past the largest numeric menu id
    fn next_menu_id(&self) -> String {
        let max = self
            .menu
            .iter()
            .filter_map(|m| m.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

fn restaurant_not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::RestaurantNotFound,
        format!("Restaurant {id} not found"),
    )
    .with_detail("restaurant_id", id)
}

fn menu_item_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
        .with_detail("menu_item_id", id)
}

/// Restaurants and menu items, editable after loading
///
/// Edits live in memory only; the CSV source is never written.
#[derive(Debug)]
pub struct Catalog {
    source: CatalogSource,
    data: OnceCell<RwLock<CatalogData>>,
}

impl Catalog {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            data: OnceCell::new(),
        }
    }

    pub fn embedded() -> Self {
        Self::new(CatalogSource::Embedded)
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(CatalogSource::Directory(dir.into()))
    }

    async fn data(&self) -> AppResult<&RwLock<CatalogData>> {
        self.data
            .get_or_try_init(|| async { self.load().await.map(RwLock::new) })
            .await
    }

    async fn load(&self) -> AppResult<CatalogData> {
        let (restaurants_csv, menu_csv) = match &self.source {
            CatalogSource::Embedded => (EMBEDDED_RESTAURANTS.to_string(), EMBEDDED_MENU.to_string()),
            CatalogSource::Directory(dir) => (
                read_source(&dir.join("restaurants.csv")).await?,
                read_source(&dir.join("menu.csv")).await?,
            ),
        };

        let restaurants: Vec<Restaurant> = parse_rows(&restaurants_csv, "restaurants.csv", restaurant_from_row)?;
        let menu: Vec<MenuItem> = parse_rows(&menu_csv, "menu.csv", menu_item_from_row)?;

        tracing::info!(
            restaurants = restaurants.len(),
            menu_items = menu.len(),
            "Catalog loaded"
        );
        Ok(CatalogData { restaurants, menu })
    }

    /// Restaurants matching `filter`, in file order
    pub async fn restaurants(&self, filter: &RestaurantFilter) -> AppResult<Vec<Restaurant>> {
        let data = self.data().await?.read();
        Ok(data
            .restaurants
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    pub async fn restaurant(&self, id: &str) -> AppResult<Restaurant> {
        let data = self.data().await?.read();
        data.restaurants
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| restaurant_not_found(id))
    }

    pub async fn menu(&self) -> AppResult<Vec<MenuItem>> {
        Ok(self.data().await?.read().menu.clone())
    }

    pub async fn menu_item(&self, id: &str) -> AppResult<MenuItem> {
        let data = self.data().await?.read();
        data.menu
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| menu_item_not_found(id))
    }

    pub async fn menu_for(&self, restaurant_id: &str) -> AppResult<Vec<MenuItem>> {
        let data = self.data().await?.read();
        Ok(data
            .menu
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    // ==================== Edits ====================

    /// Open or close a restaurant; closed restaurants take no orders
    pub async fn set_restaurant_active(&self, id: &str, is_active: bool) -> AppResult<Restaurant> {
        let mut data = self.data().await?.write();
        let restaurant = data.restaurant_mut(id)?;
        restaurant.is_active = is_active;
        Ok(restaurant.clone())
    }

    pub async fn update_restaurant(&self, id: &str, update: RestaurantUpdate) -> AppResult<Restaurant> {
        let mut data = self.data().await?.write();
        let restaurant = data.restaurant_mut(id)?;
        restaurant.apply(update);
        Ok(restaurant.clone())
    }

    /// Add an item to a restaurant's menu under the next free numeric id
    pub async fn create_menu_item(
        &self,
        restaurant_id: &str,
        payload: MenuItemCreate,
    ) -> AppResult<MenuItem> {
        payload.check_price()?;
        let mut data = self.data().await?.write();
        data.restaurant_mut(restaurant_id)?;
        let item = MenuItem {
            id: data.next_menu_id(),
            restaurant_id: restaurant_id.to_string(),
            name: payload.name.trim().to_string(),
            description: payload.description,
            price: payload.price,
            category: payload.category,
            is_veg: payload.is_veg,
            is_available: payload.is_available,
            image_url: payload.image_url.filter(|s| !s.is_empty()),
        };
        data.menu.push(item.clone());
        Ok(item)
    }

    pub async fn update_menu_item(&self, id: &str, update: MenuItemUpdate) -> AppResult<MenuItem> {
        update.check_price()?;
        let mut data = self.data().await?.write();
        let item = data.menu_item_mut(id)?;
        item.apply(update);
        Ok(item.clone())
    }

    /// Remove an item; returns what was removed
    pub async fn delete_menu_item(&self, id: &str) -> AppResult<MenuItem> {
        let mut data = self.data().await?.write();
        let index = data
            .menu
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| menu_item_not_found(id))?;
        Ok(data.menu.remove(index))
    }
}

async fn read_source(path: &Path) -> AppResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read catalog file");
        AppError::with_message(
            ErrorCode::CatalogUnavailable,
            format!("Catalog file {} unavailable", path.display()),
        )
    })
}

/// Parse `text` as CSV with a header row, converting each record
///
/// Records with the wrong number of fields, or that `convert` rejects, are
/// logged and skipped.
fn parse_rows<R, T>(
    text: &str,
    source: &str,
    convert: impl Fn(R) -> Result<T, String>,
) -> AppResult<Vec<T>>
where
    R: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers().map_err(|e| unreadable(source, &e))?.clone();
    if headers.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::CatalogUnavailable,
            format!("{source} is empty"),
        ));
    }

    let mut out = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line());
                tracing::warn!(source, ?line, error = %e, "Skipping malformed catalog row");
                continue;
            }
        };
        let line = record.position().map(|p| p.line());
        let converted = record
            .deserialize::<R>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(&convert);
        match converted {
            Ok(value) => out.push(value),
            Err(reason) => {
                tracing::warn!(source, ?line, %reason, "Skipping invalid catalog row");
            }
        }
    }
    Ok(out)
}

fn unreadable(source: &str, err: &csv::Error) -> AppError {
    tracing::error!(source, error = %err, "Failed to read catalog header");
    AppError::with_message(
        ErrorCode::CatalogUnavailable,
        format!("{source} is unreadable"),
    )
}

#[derive(Debug, Deserialize)]
struct RestaurantRow {
    id: String,
    name: String,
    cuisine: String,
    city: String,
    address: String,
    rating: String,
    delivery_time: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    is_active: String,
}

#[derive(Debug, Deserialize)]
struct MenuItemRow {
    id: String,
    restaurant_id: String,
    name: String,
    description: String,
    price: String,
    category: String,
    #[serde(default)]
    is_veg: String,
    #[serde(default)]
    is_available: String,
    #[serde(default)]
    image_url: String,
}

fn required(value: String, column: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err(format!("{column} is empty"));
    }
    Ok(value)
}

fn optional(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

fn decimal(raw: &str, column: &str) -> Result<Decimal, String> {
    raw.parse::<Decimal>()
        .map_err(|e| format!("{column}={raw}: {e}"))
}

fn flag(raw: &str, column: &str, default: bool) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("{column}={other} is not a boolean")),
    }
}

fn restaurant_from_row(row: RestaurantRow) -> Result<Restaurant, String> {
    Ok(Restaurant {
        rating: decimal(&row.rating, "rating")?,
        is_active: flag(&row.is_active, "is_active", true)?,
        id: required(row.id, "id")?,
        name: required(row.name, "name")?,
        cuisine: row.cuisine,
        city: row.city,
        address: row.address,
        delivery_time: row.delivery_time,
        image_url: optional(row.image_url),
    })
}

fn menu_item_from_row(row: MenuItemRow) -> Result<MenuItem, String> {
    let price = decimal(&row.price, "price")?;
    if price < Decimal::ZERO {
        return Err(format!("price {price} is negative"));
    }
    Ok(MenuItem {
        price,
        is_veg: flag(&row.is_veg, "is_veg", false)?,
        is_available: flag(&row.is_available, "is_available", true)?,
        id: required(row.id, "id")?,
        restaurant_id: required(row.restaurant_id, "restaurant_id")?,
        name: required(row.name, "name")?,
        description: row.description,
        category: row.category,
        image_url: optional(row.image_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU_HEADER: &str =
        "id,restaurant_id,name,description,price,category,is_veg,is_available,image_url";

    #[test]
    fn test_quoted_fields_and_crlf() {
        let csv = format!(
            "{MENU_HEADER}\r\n\r\n1,1,Soup,\"Hot, with \"\"croutons\"\"\",4.50,Starters,true,true,\r\n"
        );
        let items = parse_rows(&csv, "menu.csv", menu_item_from_row).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Hot, with \"croutons\"");
    }

    #[test]
    fn test_without_trailing_newline() {
        let csv = format!("{MENU_HEADER}\n1,1,Soup,Hot,4.50,Starters,,,");
        let items = parse_rows(&csv, "menu.csv", menu_item_from_row).unwrap();
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_veg);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = "id,restaurant_id,name,description,price,category,is_veg,is_available,image_url\n\
                   1,1,Soup,Hot,4.50,Starters,true,true,\n\
                   2,1,Broken\n\
                   3,1,Salad,Cold,not-a-price,Starters,true,true,\n\
                   4,1,Bread,Warm,2,Sides,yes,,\n";
        let items = parse_rows(csv, "menu.csv", menu_item_from_row).unwrap();
        let ids: Vec<_> = items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert!(items[1].is_veg);
        assert!(items[1].is_available);
        assert_eq!(items[0].image_url, None);
    }

    #[test]
    fn test_empty_source_is_unavailable() {
        let err = parse_rows("", "menu.csv", menu_item_from_row).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[tokio::test]
    async fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded();
        let all = catalog.restaurants(&RestaurantFilter::default()).await.unwrap();
        assert_eq!(all.len(), 8);
        let dosa = catalog.restaurant("8").await.unwrap();
        assert_eq!(dosa.name, "Dosa Corner, Since 1972");

        let menu = catalog.menu_for("1").await.unwrap();
        assert!(menu.iter().all(|m| m.restaurant_id == "1"));
        assert!(!menu.is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_city() {
        let catalog = Catalog::embedded();
        let filter = RestaurantFilter {
            city: Some("mumbai".into()),
            ..Default::default()
        };
        let hits = catalog.restaurants(&filter).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.city == "Mumbai"));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let catalog = Catalog::embedded();
        assert_eq!(
            catalog.restaurant("999").await.unwrap_err().code,
            ErrorCode::RestaurantNotFound
        );
        assert_eq!(
            catalog.menu_item("999").await.unwrap_err().code,
            ErrorCode::MenuItemNotFound
        );
    }

    #[tokio::test]
    async fn test_menu_edits() {
        let catalog = Catalog::embedded();
        let menu = catalog.menu().await.unwrap();
        let before = menu.len();
        let highest = menu.iter().filter_map(|m| m.id.parse::<u64>().ok()).max().unwrap();

        let payload: MenuItemCreate = serde_json::from_value(serde_json::json!({
            "name": "Calzone",
            "price": 11.5,
            "category": "Mains"
        }))
        .unwrap();
        let created = catalog.create_menu_item("1", payload).await.unwrap();
        assert_eq!(created.id, (highest + 1).to_string());
        assert_eq!(created.restaurant_id, "1");
        assert_eq!(catalog.menu_item(&created.id).await.unwrap().name, "Calzone");

        let updated = catalog
            .update_menu_item(
                &created.id,
                MenuItemUpdate {
                    is_available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_available);
        assert_eq!(updated.price, Decimal::new(115, 1));

        catalog.delete_menu_item(&created.id).await.unwrap();
        assert_eq!(
            catalog.menu_item(&created.id).await.unwrap_err().code,
            ErrorCode::MenuItemNotFound
        );
        assert_eq!(catalog.menu().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_menu_item_for_unknown_restaurant() {
        let catalog = Catalog::embedded();
        let payload: MenuItemCreate = serde_json::from_value(serde_json::json!({
            "name": "Ghost Soup",
            "price": 3,
            "category": "Soups"
        }))
        .unwrap();
        let err = catalog.create_menu_item("999", payload).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn test_restaurant_status_and_update() {
        let catalog = Catalog::embedded();
        let closed = catalog.set_restaurant_active("2", false).await.unwrap();
        assert!(!closed.is_active);
        assert!(!catalog.restaurant("2").await.unwrap().is_active);

        let renamed = catalog
            .update_restaurant(
                "2",
                RestaurantUpdate {
                    delivery_time: Some("15-20 min".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.delivery_time, "15-20 min");
        assert!(!renamed.is_active);
    }

    #[tokio::test]
    async fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("restaurants.csv"),
            "id,name,cuisine,city,address,rating,delivery_time,image_url,is_active\n\
             r1,Test Kitchen,Thai,Goa,\"1 Beach Rd\",4.1,20 min,,true\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("menu.csv"),
            "id,restaurant_id,name,description,price,category,is_veg,is_available,image_url\n\
             m1,r1,Pad Thai,Noodles,8.50,Mains,false,true,\n",
        )
        .unwrap();

        let catalog = Catalog::from_dir(dir.path());
        assert_eq!(catalog.restaurant("r1").await.unwrap().city, "Goa");
        assert_eq!(catalog.menu_item("m1").await.unwrap().price, "8.50".parse().unwrap());
    }

    #[tokio::test]
    async fn test_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::from_dir(dir.path().join("nope"));
        let err = catalog.menu().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }
}
