//! Selección de demanda y orden de urgencia
//!
//! Los contenedores por encima del umbral de servicio se ordenan por nivel
//! de llenado descendente. El orden es estable: a igual nivel se conserva el
//! orden en que los devolvió el store.

use std::cmp::Reverse;
use tracing::debug;

use crate::models::CollectionPoint;
use crate::repositories::{CollectionPointStore, StoreResult};

/// Umbral de llenado a partir del cual un contenedor entra en una ruta
pub const COLLECTION_THRESHOLD: i32 = 80;

/// Contenedores con nivel de llenado >= `threshold`, en el orden del store
pub async fn select_demand(
    points: &dyn CollectionPointStore,
    threshold: i32,
) -> StoreResult<Vec<CollectionPoint>> {
    debug!("🔍 Buscando contenedores con llenado >= {}%", threshold);
    points.find_by_fill_level_at_least(threshold).await
}

/// Ordenar por urgencia (llenado descendente, empates estables)
pub fn rank_by_urgency(mut points: Vec<CollectionPoint>) -> Vec<CollectionPoint> {
    points.sort_by_key(|p| Reverse(p.fill_level));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, WasteType};
    use crate::repositories::InMemoryPointStore;

    fn point(address: &str, fill_level: i32) -> CollectionPoint {
        CollectionPoint::new(Location::new(36.8, 10.1, address), WasteType::General, fill_level)
    }

    fn addresses(points: &[CollectionPoint]) -> Vec<&str> {
        points.iter().map(|p| p.location.address.as_str()).collect()
    }

    #[tokio::test]
    async fn test_select_demand_is_inclusive_at_threshold() {
        let store = InMemoryPointStore::new();
        for (address, fill) in [("a", 79), ("b", 80), ("c", 100), ("d", 0)] {
            store.save(point(address, fill)).await.unwrap();
        }

        let demand = select_demand(&store, COLLECTION_THRESHOLD).await.unwrap();
        assert_eq!(addresses(&demand), vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_select_demand_empty_is_not_an_error() {
        let store = InMemoryPointStore::new();
        store.save(point("a", 10)).await.unwrap();

        let demand = select_demand(&store, COLLECTION_THRESHOLD).await.unwrap();
        assert!(demand.is_empty());
    }

    #[test]
    fn test_rank_by_urgency_descending() {
        let ranked = rank_by_urgency(vec![point("p1", 85), point("p2", 95), point("p3", 82)]);
        assert_eq!(addresses(&ranked), vec!["p2", "p1", "p3"]);
    }

    #[test]
    fn test_rank_by_urgency_keeps_ties_in_input_order() {
        let ranked = rank_by_urgency(vec![
            point("first", 90),
            point("top", 99),
            point("second", 90),
            point("third", 90),
        ]);
        assert_eq!(addresses(&ranked), vec!["top", "first", "second", "third"]);
    }
}
