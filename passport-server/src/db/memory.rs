//! In-memory store
//!
//! Same contract as [`PgStore`](super::PgStore), including the foreign key
//! checks. Used by the router tests and by `passport serve --in-memory`.
//! All tables live behind one mutex, so composite operations are atomic.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{StoreError, VisitStore};
use crate::models::{
    Country, CountryFragment, CountryMatch, User, UserColor, UserName, VisitOutcome, VisitPolicy,
    VisitedCountry,
};

/// Reference countries used by [`MemoryStore::demo`]
const DEMO_COUNTRIES: &[(&str, &str)] = &[
    ("AR", "Argentina"),
    ("AU", "Australia"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CN", "China"),
    ("DZ", "Algeria"),
    ("DE", "Germany"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IE", "Ireland"),
    ("IN", "India"),
    ("IS", "Iceland"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("MX", "Mexico"),
    ("NE", "Niger"),
    ("NG", "Nigeria"),
    ("US", "United States"),
    ("ZA", "South Africa"),
];

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    countries: Vec<Country>,
    visits: Vec<VisitedCountry>,
    next_user_id: i32,
    next_visit_id: i32,
}

impl Tables {
    fn user(&self, id: i32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn candidates(&self, fragment: &CountryFragment) -> Vec<Country> {
        let mut found: Vec<Country> = self
            .countries
            .iter()
            .filter(|c| fragment.matches(&c.country_name))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.country_name.cmp(&b.country_name).then(a.id.cmp(&b.id)));
        found
    }

    fn insert_user(&mut self, name: &UserName, color: &UserColor) -> i32 {
        self.next_user_id += 1;
        let id = self.next_user_id;
        self.users.push(User {
            id,
            name: name.as_str().to_owned(),
            color: color.as_str().to_owned(),
        });
        id
    }

    fn insert_visit(
        &mut self,
        user_id: i32,
        country_code: &str,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError> {
        let known_country = self.countries.iter().any(|c| c.country_code == country_code);
        if self.user(user_id).is_none() || !known_country {
            return Err(StoreError::NotFound {
                resource: "user or country",
                id: format!("{user_id}/{country_code}"),
            });
        }

        let country_code = country_code.to_owned();
        let duplicate = self
            .visits
            .iter()
            .any(|v| v.user_id == user_id && v.country_code == country_code);
        if policy == VisitPolicy::Unique && duplicate {
            return Ok(VisitOutcome::AlreadyVisited { country_code });
        }

        self.next_visit_id += 1;
        self.visits.push(VisitedCountry {
            id: self.next_visit_id,
            user_id,
            country_code: country_code.clone(),
        });
        Ok(VisitOutcome::Recorded { country_code })
    }
}

/// Store holding all three tables in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Empty store with no reference countries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the given `(code, name)` reference countries.
    pub fn with_countries<'a>(countries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let countries = countries
            .into_iter()
            .zip(1..)
            .map(|((code, name), id)| Country {
                id,
                country_code: code.to_owned(),
                country_name: name.to_owned(),
            })
            .collect();

        Self {
            tables: Mutex::new(Tables {
                countries,
                ..Tables::default()
            }),
        }
    }

    /// Store seeded with a small country list, for local demos.
    pub fn demo() -> Self {
        Self::with_countries(DEMO_COUNTRIES.iter().copied())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables().users.clone())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.tables().user(id).cloned())
    }

    async fn list_visited_country_codes(&self, user_id: i32) -> Result<Vec<String>, StoreError> {
        Ok(self
            .tables()
            .visits
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.country_code.clone())
            .collect())
    }

    async fn find_country_by_name_fragment(
        &self,
        fragment: &CountryFragment,
    ) -> Result<CountryMatch, StoreError> {
        let candidates = self.tables().candidates(fragment);
        Ok(CountryMatch::resolve(fragment, candidates))
    }

    async fn record_visit(
        &self,
        user_id: i32,
        country_code: &str,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError> {
        self.tables().insert_visit(user_id, country_code, policy)
    }

    async fn create_user(&self, name: &UserName, color: &UserColor) -> Result<i32, StoreError> {
        Ok(self.tables().insert_user(name, color))
    }

    async fn visit_by_name(
        &self,
        user_id: i32,
        fragment: &CountryFragment,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError> {
        let mut tables = self.tables();

        if tables.user(user_id).is_none() {
            return Err(StoreError::user_not_found(user_id));
        }

        let candidates = tables.candidates(fragment);
        match CountryMatch::resolve(fragment, candidates) {
            CountryMatch::Unique(country) => {
                tables.insert_visit(user_id, &country.country_code, policy)
            }
            CountryMatch::NotFound => Err(StoreError::country_not_found(fragment.as_str())),
            CountryMatch::Ambiguous(candidates) => Err(StoreError::Ambiguous {
                fragment: fragment.as_str().to_owned(),
                candidates,
            }),
        }
    }

    async fn register_user(&self, name: &UserName, color: &UserColor) -> Result<User, StoreError> {
        let mut tables = self.tables();
        let id = tables.insert_user(name, color);
        tables
            .user(id)
            .cloned()
            .ok_or_else(|| StoreError::user_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> UserName {
        UserName::from_form(Some(s)).unwrap()
    }

    fn color(s: &str) -> UserColor {
        UserColor::from_form(Some(s)).unwrap()
    }

    fn fragment(s: &str) -> CountryFragment {
        CountryFragment::new(s).unwrap()
    }

    async fn store_with_user() -> (MemoryStore, i32) {
        let store = MemoryStore::demo();
        let id = store.create_user(&name("Angela"), &color("teal")).await.unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn create_then_get_user() {
        let (store, id) = store_with_user().await;
        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.name, "Angela");
        assert_eq!(user.color, "teal");
        assert!(store.get_user(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn users_listed_in_id_order() {
        let store = MemoryStore::new();
        let a = store.create_user(&name("a"), &color("red")).await.unwrap();
        let b = store.create_user(&name("b"), &color("red")).await.unwrap();
        let ids: Vec<i32> = store.list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn visit_count_tracks_recorded_visits() {
        let (store, id) = store_with_user().await;
        assert!(store.list_visited_country_codes(id).await.unwrap().is_empty());

        for code in ["FR", "DE", "FR"] {
            store
                .record_visit(id, code, VisitPolicy::AllowDuplicates)
                .await
                .unwrap();
        }

        let codes = store.list_visited_country_codes(id).await.unwrap();
        assert_eq!(codes, vec!["FR", "DE", "FR"]);
    }

    #[tokio::test]
    async fn unique_policy_skips_repeat_visits() {
        let (store, id) = store_with_user().await;
        let first = store.record_visit(id, "FR", VisitPolicy::Unique).await.unwrap();
        let second = store.record_visit(id, "FR", VisitPolicy::Unique).await.unwrap();

        assert!(matches!(first, VisitOutcome::Recorded { .. }));
        assert!(matches!(second, VisitOutcome::AlreadyVisited { .. }));
        assert_eq!(store.list_visited_country_codes(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_visit_enforces_references() {
        let (store, id) = store_with_user().await;
        let unknown_country = store.record_visit(id, "XX", VisitPolicy::default()).await;
        let unknown_user = store.record_visit(id + 9, "FR", VisitPolicy::default()).await;

        assert!(matches!(unknown_country, Err(StoreError::NotFound { .. })));
        assert!(matches!(unknown_user, Err(StoreError::NotFound { .. })));
        assert!(store.list_visited_country_codes(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookup_ignores_case() {
        let store = MemoryStore::demo();
        let lower = store.find_country_by_name_fragment(&fragment("franc")).await.unwrap();
        let upper = store.find_country_by_name_fragment(&fragment("FRANC")).await.unwrap();
        assert_eq!(lower, upper);
        assert!(matches!(lower, CountryMatch::Unique(ref c) if c.country_code == "FR"));
    }

    #[tokio::test]
    async fn visit_by_name_records_resolved_code() {
        let (store, id) = store_with_user().await;
        let outcome = store
            .visit_by_name(id, &fragment("ger"), VisitPolicy::default())
            .await
            .unwrap();
        assert_eq!(outcome.country_code(), "DE");
        assert_eq!(store.list_visited_country_codes(id).await.unwrap(), vec!["DE"]);
    }

    #[tokio::test]
    async fn visit_by_name_failures_write_nothing() {
        let (store, id) = store_with_user().await;

        let missing = store
            .visit_by_name(id, &fragment("xyz"), VisitPolicy::default())
            .await;
        assert!(matches!(
            missing,
            Err(StoreError::NotFound { resource: "country", .. })
        ));

        let ambiguous = store
            .visit_by_name(id, &fragment("land"), VisitPolicy::default())
            .await;
        assert!(matches!(ambiguous, Err(StoreError::Ambiguous { .. })));

        let no_user = store
            .visit_by_name(id + 1, &fragment("france"), VisitPolicy::default())
            .await;
        assert!(matches!(
            no_user,
            Err(StoreError::NotFound { resource: "user", .. })
        ));

        assert!(store.list_visited_country_codes(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_user_reads_back_defaults() {
        let store = MemoryStore::new();
        let user = store
            .register_user(
                &UserName::from_form(Some("")).unwrap(),
                &UserColor::from_form(None).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(user.name, "user");
        assert_eq!(user.color, "red");
        assert!(store.list_visited_country_codes(user.id).await.unwrap().is_empty());
    }
}
