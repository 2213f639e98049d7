use super::ParentResource;
use crate::domain::AssociationManager;
use crate::error::ApiError;
use crate::services::AppState;
use crate::storage::{SqliteStore, Store};
use actix_web::{web, HttpResponse};
use common::model::person::Person;
use common::responses::WithPeople;
use log::info;

pub async fn process<P>(state: web::Data<AppState>) -> Result<HttpResponse, ApiError>
where
    P: ParentResource,
    SqliteStore: Store<P>,
{
    info!("Received request to get all {} records", P::KIND);
    let store = state.store()?;
    let listing = list_with_people::<P, _>(&*store)?;
    Ok(HttpResponse::Ok().json(listing))
}

/// Every stored `P` together with its derived people view.
pub fn list_with_people<P, S>(store: &S) -> Result<Vec<WithPeople<P>>, ApiError>
where
    P: ParentResource,
    S: Store<P> + Store<Person>,
{
    let parents = <S as Store<P>>::find_all(store)?;
    if parents.is_empty() {
        return Err(ApiError::Empty(P::KIND));
    }
    let manager = AssociationManager::new(store);
    parents
        .into_iter()
        .map(|parent| -> Result<WithPeople<P>, ApiError> {
            let people = manager.owned(&parent)?;
            Ok(WithPeople { parent, people })
        })
        .collect()
}
