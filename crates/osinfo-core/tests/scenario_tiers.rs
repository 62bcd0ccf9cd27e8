//! # Scenario Tier Tests (T0-T5)
//!
//! Each tier builds on the ones before it. A failure in a lower tier makes
//! the higher tiers meaningless.
//!
//! ## Tiers
//! - T0: Entity Properties
//! - T1: Filter Matching
//! - T2: Collection Algebra
//! - T3: Relationship Graph
//! - T4: Device Links
//! - T5: Catalog Queries

use osinfo_core::{
    Catalog, CatalogError, Device, DeviceList, Entity, Filter, Hypervisor, Os, OsFilter, OsList,
    Platform, ProductFilter, Relationship, RelationshipGraph,
};
use osinfo_core::keys::{
    DEVICE_CLASS, DEVICE_LINK_DRIVER, PRODUCT_EOL_DATE, PRODUCT_RELEASE_DATE, PRODUCT_SHORT_ID,
    PRODUCT_VENDOR,
};

// =============================================================================
// TIER T0: ENTITY PROPERTIES
// =============================================================================

mod t0_entity_properties {
    use super::*;

    /// T0.1: Multi-valued vendor keeps insertion order.
    #[test]
    fn fedora_vendor_values() {
        let mut entity = Entity::new("fedora-11").expect("entity");
        entity.add_param(PRODUCT_VENDOR, "Fedora Project");
        entity.add_param(PRODUCT_VENDOR, "Red Hat");

        assert_eq!(entity.param_value(PRODUCT_VENDOR), Some("Fedora Project"));
        assert_eq!(
            entity.param_value_list(PRODUCT_VENDOR),
            ["Fedora Project".to_string(), "Red Hat".to_string()]
        );
    }

    /// T0.2: set_param collapses to one value, add_param appends.
    #[test]
    fn set_then_add() {
        let mut entity = Entity::new("e").expect("entity");
        entity.add_param("k", "a");
        entity.add_param("k", "b");
        entity.set_param("k", "c");
        assert_eq!(entity.param_value_list("k").len(), 1);

        entity.add_param("k", "d");
        assert_eq!(
            entity.param_value_list("k"),
            ["c".to_string(), "d".to_string()]
        );
    }

    /// T0.3: Empty ids fail loudly for every kind.
    #[test]
    fn empty_ids_rejected() {
        assert!(matches!(Entity::new(""), Err(CatalogError::InvalidArgument(_))));
        assert!(matches!(Os::new(""), Err(CatalogError::InvalidArgument(_))));
        assert!(matches!(Device::new(""), Err(CatalogError::InvalidArgument(_))));
        assert!(matches!(
            Hypervisor::new(""),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    /// T0.4: Writes through one handle are seen through every other.
    #[test]
    fn aliasing_is_visible() {
        let mut catalog = Catalog::new();
        let os = Os::new("fedora-11").expect("os");
        catalog.add_os(os.clone());

        let derived = OsList::new_copy(catalog.os_list());
        os.set_param(PRODUCT_SHORT_ID, "fedora11");

        let seen = derived.get_nth(0).expect("nth");
        assert_eq!(seen.short_id().as_deref(), Some("fedora11"));
    }
}

// =============================================================================
// TIER T1: FILTER MATCHING
// =============================================================================

mod t1_filter_matching {
    use super::*;

    /// T1.1: Two accepted values for one key act as OR.
    #[test]
    fn or_within_key() {
        let mut entity = Entity::new("e").expect("entity");
        entity.add_param("key", "v2");

        let mut filter = Filter::new();
        filter.add_constraint("key", "v1");
        filter.add_constraint("key", "v2");
        assert!(filter.matches(&entity));
    }

    /// T1.2: Two keys act as AND.
    #[test]
    fn and_across_keys() {
        let mut entity = Entity::new("e").expect("entity");
        entity.add_param("a", "1");

        let mut filter = Filter::new();
        filter.add_constraint("a", "1");
        filter.add_constraint("b", "2");
        assert!(!filter.matches(&entity));

        entity.add_param("b", "2");
        assert!(filter.matches(&entity));
    }

    /// T1.3: Support date narrows a platform list.
    #[test]
    fn support_date_narrows_products() {
        let mut catalog = Catalog::new();
        for (id, release, eol) in [
            ("old", "2001-01-01", "2005-01-01"),
            ("current", "2009-06-01", "2012-06-01"),
            ("future", "2015-01-01", "2020-01-01"),
        ] {
            let platform = Platform::new(id).expect("platform");
            platform.set_param(PRODUCT_RELEASE_DATE, release);
            platform.set_param(PRODUCT_EOL_DATE, eol);
            catalog.add_platform(platform);
        }

        let mut filter = ProductFilter::new();
        filter.set_support_date(chrono::NaiveDate::from_ymd_opt(2010, 6, 1));

        let supported = osinfo_core::PlatformList::new_filtered(catalog.platform_list(), &filter);
        assert_eq!(supported.ids(), vec!["current"]);
    }
}

// =============================================================================
// TIER T2: COLLECTION ALGEBRA
// =============================================================================

mod t2_collection_algebra {
    use super::*;

    fn devices(ids: &[&str]) -> DeviceList {
        ids.iter()
            .map(|id| Device::new(*id).expect("device"))
            .collect()
    }

    /// T2.1: Union puts b first, then a-only ids.
    #[test]
    fn union_order() {
        let a = devices(&["rtl8139", "e1000", "sb16"]);
        let b = devices(&["virtio", "e1000"]);

        let out = DeviceList::new_union(&a, &b);
        assert_eq!(out.ids(), vec!["virtio", "e1000", "rtl8139", "sb16"]);
    }

    /// T2.2: Intersection keeps a's order and dedups a.
    #[test]
    fn intersection_order() {
        let a = devices(&["sb16", "e1000", "sb16", "virtio"]);
        let b = devices(&["virtio", "sb16"]);

        let out = DeviceList::new_intersection(&a, &b);
        assert_eq!(out.ids(), vec!["sb16", "virtio"]);
    }

    /// T2.3: Chained derivations share records with the source.
    #[test]
    fn chained_derivations_share_records() {
        let a = devices(&["e1000", "sb16"]);
        let b = devices(&["e1000"]);
        let inter = DeviceList::new_intersection(&a, &b);
        let copy = DeviceList::new_copy(&inter);

        let original = a.find_by_id("e1000").expect("found");
        original.set_param(DEVICE_CLASS, "network");
        let through = copy.get_nth(0).expect("nth");
        assert_eq!(through.class().as_deref(), Some("network"));
    }
}

// =============================================================================
// TIER T3: RELATIONSHIP GRAPH
// =============================================================================

mod t3_relationship_graph {
    use super::*;

    /// T3.1: fedora-11 upgrades fedora-10.
    #[test]
    fn fedora_upgrade() {
        let f11 = Os::new("fedora-11").expect("os");
        let mut graph = RelationshipGraph::new();
        graph
            .add_relationship(&f11, "fedora-10", Relationship::Upgrades)
            .expect("edge");

        let upgrades = graph.query_by_verb(Relationship::Upgrades);
        assert_eq!(upgrades.len(), 1);
        assert_eq!(upgrades[0].subject, "fedora-11");
        assert!(graph.query_by_verb(Relationship::DerivesFrom).is_empty());
        assert!(graph.indices_consistent());
    }

    /// T3.2: Verb strings are validated.
    #[test]
    fn verb_strings_validated() {
        assert_eq!(
            "derives-from".parse::<Relationship>(),
            Ok(Relationship::DerivesFrom)
        );
        assert!(matches!(
            "obsoletes".parse::<Relationship>(),
            Err(CatalogError::InvalidVerb(_))
        ));
    }

    /// T3.3: Rejected duplicates leave the graph as it was.
    #[test]
    fn rejected_duplicate_changes_nothing() {
        let f11 = Os::new("fedora-11").expect("os");
        let mut graph = RelationshipGraph::new();
        graph
            .add_relationship(&f11, "fedora-10", Relationship::Upgrades)
            .expect("edge");
        let before = graph.edges();

        let result = graph.add_relationship(&f11, "fedora-10", Relationship::Upgrades);
        assert!(matches!(result, Err(CatalogError::DuplicateEdge { .. })));
        assert_eq!(graph.edges(), before);
    }
}

// =============================================================================
// TIER T4: DEVICE LINKS
// =============================================================================

mod t4_device_links {
    use super::*;

    /// T4.1: Hypervisor awesome lists only its network device.
    #[test]
    fn hypervisor_network_devices() {
        let hv = Hypervisor::new("awesome").expect("hypervisor");
        let e1000 = Device::new("e1000").expect("device");
        e1000.add_param(DEVICE_CLASS, "network");
        let sb16 = Device::new("sb16").expect("device");
        sb16.add_param(DEVICE_CLASS, "audio");
        hv.add_device(&e1000);
        hv.add_device(&sb16);

        let mut filter = Filter::new();
        filter.add_constraint(DEVICE_CLASS, "network");
        let found = hv.devices(Some(&filter));

        assert_eq!(found.len(), 1);
        assert!(found.get_nth(0).expect("nth").same_entity(&e1000));
    }

    /// T4.2: Link properties survive the projection to links.
    #[test]
    fn driver_kept_on_link() {
        let os = Os::new("fedora-11").expect("os");
        let e1000 = Device::new("e1000").expect("device");
        os.add_device(&e1000).set_param(DEVICE_LINK_DRIVER, "e1000");

        let links = os.device_links(None);
        let link = links.get_nth(0).expect("nth");
        assert_eq!(link.driver().as_deref(), Some("e1000"));
        assert_eq!(link.id(), "e1000");
        assert!(e1000.param_value(DEVICE_LINK_DRIVER).is_none());
    }

    /// T4.3: Platform-scoped OS links stay out of unscoped queries.
    #[test]
    fn scoped_links_hidden_from_unscoped_queries() {
        let os = Os::new("awesome").expect("os");
        let platform = Platform::new("magical").expect("platform");
        os.add_device_for_platform(&platform, &Device::new("virtio").expect("device"));

        assert!(os.devices(None).is_empty());
        assert_eq!(os.devices_for_platform(&platform, None).len(), 1);
    }
}

// =============================================================================
// TIER T5: CATALOG QUERIES
// =============================================================================

mod t5_catalog_queries {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (id, vendor) in [
            ("fedora-10", "Fedora Project"),
            ("fedora-11", "Fedora Project"),
            ("rhel-6", "Red Hat"),
            ("centos-6", "CentOS"),
        ] {
            let os = Os::new(id).expect("os");
            os.set_param(PRODUCT_VENDOR, vendor);
            catalog.add_os(os);
        }
        let f11 = catalog.os("fedora-11").expect("os");
        let rhel = catalog.os("rhel-6").expect("os");
        let centos = catalog.os("centos-6").expect("os");
        catalog
            .add_relationship(&f11, "fedora-10", Relationship::Upgrades)
            .expect("edge");
        catalog
            .add_relationship(&rhel, "fedora-11", Relationship::DerivesFrom)
            .expect("edge");
        catalog
            .add_relationship(&centos, "rhel-6", Relationship::Clones)
            .expect("edge");
        catalog
            .add_relationship(&centos, "fedora-11", Relationship::DerivesFrom)
            .expect("edge");
        catalog
    }

    /// T5.1: Unique vendors are sorted and deduplicated.
    #[test]
    fn unique_vendors() {
        assert_eq!(
            catalog().unique_values_for_property_in_os(PRODUCT_VENDOR),
            vec!["CentOS", "Fedora Project", "Red Hat"]
        );
    }

    /// T5.2: Reverse query finds everything derived from fedora-11.
    #[test]
    fn derived_from_fedora() {
        let catalog = catalog();
        assert_eq!(
            catalog
                .oses_related_to("fedora-11", Relationship::DerivesFrom)
                .ids(),
            vec!["rhel-6", "centos-6"]
        );
    }

    /// T5.3: OsFilter combines vendor and relationship constraints.
    #[test]
    fn os_filter_combines_constraints() {
        let catalog = catalog();
        let f11 = catalog.os("fedora-11").expect("os");

        let mut filter = OsFilter::new();
        filter.add_os_constraint(Relationship::DerivesFrom, &f11);
        assert_eq!(catalog.oses_matching(&filter).ids(), vec!["rhel-6", "centos-6"]);

        filter.add_constraint(PRODUCT_VENDOR, "CentOS");
        assert_eq!(catalog.oses_matching(&filter).ids(), vec!["centos-6"]);
    }

    /// T5.4: Relationship subjects listed once per verb.
    #[test]
    fn relationship_subjects() {
        let catalog = catalog();
        assert_eq!(
            catalog
                .unique_values_for_os_relationship(Relationship::DerivesFrom)
                .ids(),
            vec!["rhel-6", "centos-6"]
        );
        assert!(
            catalog
                .unique_values_for_os_relationship(Relationship::Upgrades)
                .find_by_id("fedora-11")
                .is_some()
        );
    }
}
