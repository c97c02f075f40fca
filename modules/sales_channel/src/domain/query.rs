//! Query building: merges a selector and a find config into one repository query

use crate::contract::{
    FindConfig, SalesChannelError, SalesChannelField, SalesChannelSelector, SortDirection,
};

/// Relations a sales channel query may expand. Sales channels currently
/// expose none.
pub const ALLOWED_RELATIONS: &[&str] = &[];

/// Fully resolved repository query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesChannelQuery {
    pub selector: SalesChannelSelector,
    pub relations: Vec<String>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    pub order: Vec<(SalesChannelField, SortDirection)>,
    pub with_deleted: bool,
}

/// Build a repository query from a selector and a find config.
///
/// Unknown relations are rejected. Without an explicit order, results are
/// sorted by creation time and then id so paging is stable.
pub fn build_query(
    selector: SalesChannelSelector,
    config: FindConfig,
) -> Result<SalesChannelQuery, SalesChannelError> {
    if let Some(unknown) = config
        .relations
        .iter()
        .find(|r| !ALLOWED_RELATIONS.contains(&r.as_str()))
    {
        return Err(SalesChannelError::invalid(format!(
            "unknown sales channel relation '{}'",
            unknown
        )));
    }

    let order = if config.order.is_empty() {
        vec![
            (SalesChannelField::CreatedAt, SortDirection::Asc),
            (SalesChannelField::Id, SortDirection::Asc),
        ]
    } else {
        config.order
    };

    let selector = SalesChannelSelector {
        q: selector.q.filter(|q| !q.trim().is_empty()),
        ..selector
    };

    Ok(SalesChannelQuery {
        selector,
        relations: config.relations,
        skip: config.skip,
        take: config.take,
        order,
        with_deleted: config.with_deleted,
    })
}

/// Resolve paging for a list request: `skip` defaults to 0, `take` to
/// `default_take`, and `take` never exceeds `max_take`
pub fn resolve_paging(config: &mut FindConfig, default_take: u64, max_take: u64) {
    config.skip = Some(config.skip.unwrap_or(0));
    config.take = Some(config.take.unwrap_or(default_take).min(max_take));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ErrorKind;

    #[test]
    fn test_build_query_by_id_keeps_config() {
        let query = build_query(
            SalesChannelSelector::by_id("sc_1"),
            FindConfig::default().with_deleted(),
        )
        .unwrap();

        assert_eq!(query.selector.ids, Some(vec!["sc_1".to_string()]));
        assert!(query.with_deleted);
        assert_eq!(query.take, None);
    }

    #[test]
    fn test_default_order_is_stable() {
        let query = build_query(SalesChannelSelector::default(), FindConfig::default()).unwrap();

        assert_eq!(
            query.order,
            vec![
                (SalesChannelField::CreatedAt, SortDirection::Asc),
                (SalesChannelField::Id, SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn test_explicit_order_wins() {
        let config = FindConfig::default().order_by(SalesChannelField::Name, SortDirection::Desc);

        let query = build_query(SalesChannelSelector::default(), config).unwrap();

        assert_eq!(query.order, vec![(SalesChannelField::Name, SortDirection::Desc)]);
    }

    #[test]
    fn test_unknown_relation_rejected() {
        let config = FindConfig {
            relations: vec!["products".to_string()],
            ..Default::default()
        };

        let err = build_query(SalesChannelSelector::default(), config).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let selector = SalesChannelSelector {
            q: Some("   ".to_string()),
            ..Default::default()
        };

        let query = build_query(selector, FindConfig::default()).unwrap();

        assert_eq!(query.selector.q, None);
    }

    #[test]
    fn test_resolve_paging() {
        let mut config = FindConfig::default();
        resolve_paging(&mut config, 10, 100);
        assert_eq!((config.skip, config.take), (Some(0), Some(10)));

        let mut config = FindConfig::default().skip(20).take(500);
        resolve_paging(&mut config, 10, 100);
        assert_eq!((config.skip, config.take), (Some(20), Some(100)));
    }
}
