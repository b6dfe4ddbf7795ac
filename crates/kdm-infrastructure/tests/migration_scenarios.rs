//! End-to-end campaign migration scenarios over the standard chain.

use kdm_core::campaign::Campaign;
use kdm_core::monster::{Bestiary, UNRESOLVED_ID};
use kdm_core::version::{app_version, oldest_known_version};
use kdm_core::CampaignRepository;
use kdm_infrastructure::migration::{
    CampaignMigrator, DetectedVersion, MigrationChain, migrate_campaign,
};
use kdm_infrastructure::{DocumentStore, JsonCampaignRepository};
use semver::Version;
use serde_json::{Value, json};
use tempfile::TempDir;

fn v(raw: &str) -> Version {
    Version::parse(raw).unwrap()
}

fn migrated(mut doc: Value) -> Value {
    migrate_campaign(&mut doc, &app_version());
    doc
}

fn legacy_campaign() -> Value {
    json!({
        "settings": { "disableToasts": true },
        "selectedSettlementId": 1,
        "settlements": [
            {
                "id": 1,
                "name": "Settlement 1",
                "nemeses": [
                    { "name": "Butcher", "unlocked": true, "level1": true },
                    { "name": "Unknown Nemesis", "unlocked": false }
                ],
                "quarries": [
                    { "name": "White Lion", "unlocked": true, "ccPrologue": true },
                    { "name": "Unknown Quarry" }
                ]
            },
            { "id": 2, "name": "Settlement 2", "nemeses": [], "quarries": [] }
        ],
        "survivors": [
            { "id": 10, "settlement": 1, "name": "Allister" },
            { "id": 11, "settlement": 2, "name": "Erza" }
        ],
        "hunts": [
            {
                "id": 100,
                "settlementId": 1,
                "survivors": [10],
                "survivorDetails": [{ "id": 10, "color": "red" }],
                "monster": { "name": "White Lion", "level": 1, "aiDeckSize": 8 }
            }
        ],
        "customMonsters": {
            "c-1": { "name": "Gold Smoke Knight", "type": "nemesis", "node": "NN3" },
            "c-2": { "name": "Frogdog", "type": "quarry", "node": "NQ2" }
        }
    })
}

#[test]
fn test_identity_same_reference() {
    let mut doc = legacy_campaign();
    let before: *const Value = &doc;

    let returned = migrate_campaign(&mut doc, &app_version());

    assert!(std::ptr::eq(before, returned));
}

#[test]
fn test_idempotence() {
    let once = migrated(legacy_campaign());
    let twice = migrated(once.clone());

    assert_eq!(once, twice);
}

#[test]
fn test_untagged_document_reaches_target() {
    let doc = migrated(json!({ "settlements": [], "survivors": [] }));

    assert_eq!(doc["version"], kdm_core::APP_VERSION);
}

#[test]
fn test_newer_document_is_untouched() {
    let original = json!({ "version": "99.0.0", "settlements": [{ "id": 1 }] });
    let doc = migrated(original.clone());

    assert_eq!(doc, original);
}

#[test]
fn test_unparseable_version_is_untouched() {
    let original = json!({ "version": "banana", "hunts": null });
    let doc = migrated(original.clone());

    assert_eq!(doc, original);
}

#[test]
fn test_injected_target_stops_cascade() {
    let mut doc = legacy_campaign();
    let report = CampaignMigrator::standard().migrate_with_report(&mut doc, &v("0.14.0"));

    assert_eq!(report.from, DetectedVersion::Absent);
    assert_eq!(report.to, DetectedVersion::Known(v("0.14.0")));
    assert_eq!(report.applied.len(), 3);
    // Name reconciliation belongs to a later step
    assert_eq!(doc["settlements"][0]["nemeses"][0]["name"], "Butcher");
    assert!(doc["settlements"][0]["nemeses"][0].get("id").is_none());
    assert_eq!(doc["survivors"][0]["color"], "red");
}

#[test]
fn test_resuming_from_intermediate_version() {
    let mut doc = legacy_campaign();
    let migrator = CampaignMigrator::standard();
    migrator.migrate(&mut doc, &v("0.14.0"));
    migrator.migrate(&mut doc, &app_version());

    assert_eq!(doc, migrated(legacy_campaign()));
}

#[test]
fn test_defaulting_completeness() {
    let doc = migrated(json!({ "settlements": [], "survivors": [] }));

    assert_eq!(doc["hunts"], json!([]));
    assert_eq!(doc["showdowns"], json!([]));
    assert_eq!(doc["survivors"], json!([]));
    assert_eq!(doc["customNemeses"], json!({}));
    assert_eq!(doc["customQuarries"], json!({}));
    assert!(doc.get("customMonsters").is_none());
    assert_eq!(doc["settings"]["disableToasts"], false);
    assert_eq!(doc["settings"]["unlockedMonsters"]["whiteGigalion"], false);
    assert_eq!(doc["selectedSettlementId"], Value::Null);
    assert_eq!(doc["selectedHuntMonsterIndex"], 0);
    assert_eq!(doc["selectedShowdownMonsterIndex"], 0);
}

#[test]
fn test_ai_deck_conversion() {
    let doc = migrated(json!({
        "hunts": [
            { "id": 1, "monster": { "name": "White Lion", "aiDeckSize": 8 } },
            { "id": 2, "monster": { "name": "Gorm" } }
        ]
    }));

    let sized = &doc["hunts"][0]["monsters"][0];
    assert_eq!(sized["aiDeck"], json!({ "basic": 8, "advanced": 0, "legendary": 0 }));
    assert_eq!(sized["aiDeckRemaining"], 8);
    assert!(sized.get("aiDeckSize").is_none());

    let unsized_monster = &doc["hunts"][1]["monsters"][0];
    assert_eq!(unsized_monster["aiDeck"], json!({ "basic": 0, "advanced": 0, "legendary": 0 }));
    assert_eq!(unsized_monster["aiDeckRemaining"], 0);
    assert!(doc["hunts"][1].get("monster").is_none());
}

#[test]
fn test_name_reconciliation() {
    let bestiary = Bestiary::standard();
    let (first_id, first) = bestiary.nemeses().iter().next().unwrap();
    let (quarry_id, quarry) = bestiary.quarries().iter().last().unwrap();

    let doc = migrated(json!({
        "settlements": [{
            "id": 1,
            "nemeses": [{ "name": first.name, "unlocked": true }, { "name": "Unknown Nemesis" }],
            "quarries": [{ "name": quarry.name }, { "name": "Unknown Quarry" }]
        }]
    }));

    let nemeses = &doc["settlements"][0]["nemeses"];
    assert_eq!(nemeses[0]["id"], *first_id);
    assert_eq!(nemeses[0]["unlocked"], true);
    assert_eq!(nemeses[1]["id"], UNRESOLVED_ID);

    let quarries = &doc["settlements"][0]["quarries"];
    assert_eq!(quarries[0]["id"], *quarry_id);
    assert_eq!(quarries[0]["node"], quarry.node.as_str());
    assert_eq!(quarries[1]["id"], UNRESOLVED_ID);
    assert_eq!(quarries[1]["node"], "NQ1");
}

#[test]
fn test_multi_settlement_scenario() {
    let doc = migrated(legacy_campaign());
    let settlements = doc["settlements"].as_array().unwrap();

    assert_eq!(settlements.len(), 2);
    assert_eq!(settlements[0]["name"], "Settlement 1");
    assert_eq!(settlements[0]["id"], 1);
    assert_eq!(settlements[0]["nemeses"][0]["id"], 1);
    assert_eq!(settlements[0]["nemeses"][0]["name"], "Butcher");
    assert_eq!(settlements[0]["nemeses"][0]["level1"], true);
    assert_eq!(settlements[0]["nemeses"][1]["id"], UNRESOLVED_ID);
    assert_eq!(settlements[0]["nemeses"][1]["name"], "Unknown Nemesis");
    assert_eq!(settlements[0]["quarries"][0]["id"], 1);
    assert_eq!(settlements[0]["quarries"][0]["node"], "NQ1");
    assert_eq!(settlements[0]["quarries"][0]["ccPrologue"], true);

    assert_eq!(settlements[1]["name"], "Settlement 2");
    assert_eq!(settlements[1]["nemeses"], json!([]));
    assert_eq!(settlements[1]["quarries"], json!([]));
}

#[test]
fn test_survivor_colors_do_not_cross_settlements() {
    let doc = migrated(legacy_campaign());

    assert_eq!(doc["survivors"][0]["color"], "red");
    assert_eq!(doc["survivors"][0]["wanderer"], false);
    assert_eq!(doc["survivors"][1]["color"], "neutral");
}

#[test]
fn test_custom_monsters_partitioned() {
    let doc = migrated(legacy_campaign());

    assert_eq!(doc["customNemeses"]["c-1"]["node"], "NN3");
    assert!(doc["customNemeses"]["c-1"].get("huntBoard").is_none());
    assert_eq!(doc["customQuarries"]["c-2"]["locations"], json!([]));
    assert!(doc.get("customMonsters").is_none());
}

#[test]
fn test_migrated_legacy_document_decodes() {
    let doc = migrated(legacy_campaign());
    let campaign: Campaign = serde_json::from_value(doc).unwrap();

    assert_eq!(campaign.version.as_deref(), Some(kdm_core::APP_VERSION));
    assert!(campaign.settings.disable_toasts);
    assert_eq!(campaign.settlements.len(), 2);
    assert!(campaign.settlements[0].nemeses[0].is_resolved());
    assert!(!campaign.settlements[0].nemeses[1].is_resolved());
    assert_eq!(campaign.hunts[0].monsters[0].ai_deck.total(), 8);
    assert_eq!(campaign.custom_nemeses.len(), 1);
    assert_eq!(campaign.custom_quarries.len(), 1);
}

#[test]
fn test_chain_lineage() {
    let migrator = CampaignMigrator::standard();
    let path = migrator.registry().available_path(&oldest_known_version());
    let rendered: Vec<String> = path.iter().map(|version| version.to_string()).collect();

    assert_eq!(
        rendered,
        vec![
            "0.12.0", "0.13.0", "0.13.1", "0.14.0", "0.14.1", "0.14.2", "0.15.0", "0.15.1",
            "0.15.2", "0.16.0"
        ]
    );
}

#[test]
fn test_repository_upgrades_stored_campaign_once() {
    let temp_dir = TempDir::new().unwrap();
    let repository = JsonCampaignRepository::new(DocumentStore::new(temp_dir.path()), "campaign");
    repository.save_raw(&legacy_campaign()).unwrap();

    let (first, report) = repository.load_with_report().unwrap().unwrap();
    assert_eq!(report.from, DetectedVersion::Absent);
    assert!(!report.is_noop());

    let (second, report) = repository.load_with_report().unwrap().unwrap();
    assert!(report.is_noop());
    assert_eq!(first, second);

    let campaign = repository.load_typed().unwrap().unwrap();
    assert_eq!(campaign.settlements[1].name, "Settlement 2");
}
