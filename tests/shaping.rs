use lol_profiles::profile::{
    PlacementRow, PlayCount, ProfileRow, build_profile, build_trophies_and_timeline,
    champion_image_name, champions_from_counts, derive_year, favorite_champions,
    format_placement, strip_revision_suffix,
};
use lol_profiles::scoreboard_fetch::ChampionCount;

fn placement(page: &str, place: &str) -> PlacementRow {
    PlacementRow {
        overview_page: page.to_string(),
        team: "T1".to_string(),
        role: "Mid".to_string(),
        place: place.to_string(),
    }
}

#[test]
fn derive_year_finds_first_20xx_token() {
    assert_eq!(derive_year("2023_Worlds"), Some(2023));
    assert_eq!(derive_year("MSI_2022_Play-In"), Some(2022));
    assert_eq!(derive_year("Worlds"), None);
    assert_eq!(derive_year(""), None);
    // Embedded in a longer digit run still matches the 20xx window.
    assert_eq!(derive_year("12023_Cup"), Some(2023));
    assert_eq!(derive_year("Season_12_Finals"), None);
}

#[test]
fn format_placement_medals_and_passthrough() {
    assert_eq!(format_placement("1"), "🥇 1st");
    assert_eq!(format_placement("2"), "🥈 2nd");
    assert_eq!(format_placement("3"), "🥉 3rd");
    assert_eq!(format_placement("4"), "🏅 4th");
    assert_eq!(format_placement("5"), "5");
    assert_eq!(format_placement("3 - 4"), "3 - 4");
    assert_eq!(format_placement(""), "N/A");
}

#[test]
fn champion_image_name_strips_punctuation() {
    assert_eq!(champion_image_name("Kai'Sa"), "KaiSa.png");
    assert_eq!(champion_image_name("Dr. Mundo"), "DrMundo.png");
    assert_eq!(champion_image_name("Ahri"), "Ahri.png");
    assert_eq!(champion_image_name(""), "Default.png");
}

#[test]
fn trophies_and_timeline_from_placements() {
    let placements = vec![
        placement("2023_Worlds", "1"),
        placement("2022_MSI", "2"),
    ];
    let shaped = build_trophies_and_timeline(&placements);

    assert_eq!(shaped.trophies.len(), 1);
    assert_eq!(shaped.trophies[0].label, "2023 Worlds");
    assert_eq!(shaped.trophies[0].count, 1);
    assert_eq!(shaped.trophies[0].icon, "🏆");

    assert_eq!(shaped.timeline.len(), 2);
    assert_eq!(shaped.timeline[0].year, 2023);
    assert_eq!(shaped.timeline[0].event, "Played in 2023 Worlds — 1st title");
    assert_eq!(shaped.timeline[1].year, 2022);
    assert_eq!(shaped.timeline[1].event, "Played in 2022 MSI");
}

#[test]
fn yearless_win_counts_a_trophy_but_no_timeline_entry() {
    let placements = vec![placement("Legacy_Cup", "1")];
    let shaped = build_trophies_and_timeline(&placements);
    assert_eq!(shaped.trophies.len(), 1);
    assert_eq!(shaped.trophies[0].label, "Legacy Cup");
    assert!(shaped.timeline.is_empty());
}

#[test]
fn repeat_wins_increment_the_same_tally_entry() {
    let placements = vec![
        placement("2023_LCK_Spring", "1"),
        placement("2023_LCK_Spring", "1"),
    ];
    let shaped = build_trophies_and_timeline(&placements);
    assert_eq!(shaped.trophies.len(), 1);
    assert_eq!(shaped.trophies[0].count, 2);
}

#[test]
fn timeline_ties_keep_encounter_order() {
    let placements = vec![
        placement("2021_Summer_Split", "3"),
        placement("2021_Spring_Split", "2"),
        placement("2020_Worlds", "1"),
    ];
    let shaped = build_trophies_and_timeline(&placements);
    assert_eq!(shaped.timeline.len(), 3);
    assert_eq!(shaped.timeline[0].event, "Played in 2021 Summer Split");
    assert_eq!(shaped.timeline[1].event, "Played in 2021 Spring Split");
    assert_eq!(shaped.timeline[2].year, 2020);
}

#[test]
fn strip_revision_suffix_cases() {
    assert_eq!(
        strip_revision_suffix("https://cdn.example/a/b.png/revision/latest?cb=1"),
        "https://cdn.example/a/b.png"
    );
    assert_eq!(
        strip_revision_suffix("https://cdn.example/a/b.png"),
        "https://cdn.example/a/b.png"
    );
}

#[test]
fn favorite_champions_parse_and_image_names() {
    let champs = favorite_champions("Azir, Kai'Sa , ,LeBlanc");
    assert_eq!(champs.len(), 3);
    assert_eq!(champs[0].name, "Azir");
    assert_eq!(champs[0].games, PlayCount::unknown());
    assert_eq!(champs[1].image, "KaiSa.png");
    assert_eq!(champs[2].name, "LeBlanc");

    assert!(favorite_champions("").is_empty());
}

#[test]
fn aggregated_champions_serialize_counts_and_placeholders() {
    let counts = vec![
        ChampionCount {
            champion: "Dr. Mundo".to_string(),
            games: 14,
        },
        ChampionCount {
            champion: String::new(),
            games: 3,
        },
    ];
    let champions = champions_from_counts(&counts);
    assert_eq!(champions.len(), 1);
    assert_eq!(champions[0].image, "DrMundo.png");

    let value = serde_json::to_value(&champions[0]).expect("entry should serialize");
    assert_eq!(value["games"], 14);

    let fav = favorite_champions("Ahri");
    let value = serde_json::to_value(&fav[0]).expect("entry should serialize");
    assert_eq!(value["games"], "unknown");
}

#[test]
fn build_profile_falls_back_to_input_name_and_default_role() {
    let row = ProfileRow {
        name: "Lee Sang-hyeok".to_string(),
        ..ProfileRow::default()
    };
    let doc = build_profile("Faker", &row, &[], None);
    assert_eq!(doc.name, "Faker");
    assert_eq!(doc.realname, "Lee Sang-hyeok");
    assert_eq!(doc.role, "Unknown");
    assert!(doc.avatar.is_none());
    assert!(doc.champions.is_empty());
}

#[test]
fn build_profile_assembles_all_sections() {
    let row = ProfileRow {
        name: "Lee Sang-hyeok".to_string(),
        id: "Faker".to_string(),
        team: "T1".to_string(),
        country: "South Korea".to_string(),
        image: "T1 Faker 2023 WC.png".to_string(),
        role: "Mid".to_string(),
        fav_champs: "Azir, Ahri".to_string(),
    };
    let placements = vec![
        placement("2023_Worlds", "1"),
        placement("2022_MSI", "2"),
    ];
    let doc = build_profile(
        "Faker",
        &row,
        &placements,
        Some("https://cdn.example/faker.png".to_string()),
    );
    assert_eq!(doc.name, "Faker");
    assert_eq!(doc.team, "T1");
    assert_eq!(doc.avatar.as_deref(), Some("https://cdn.example/faker.png"));
    assert_eq!(doc.trophies.len(), 1);
    assert_eq!(doc.champions.len(), 2);
    assert_eq!(doc.career_timeline.len(), 2);
}
