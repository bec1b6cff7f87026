//! Query properties over a preprocessed table
//!
//! Frames are built with `df!`, run through the public `preprocess` entry point,
//! and checked against properties every query must hold regardless of the data.

use olympics_analytics::{
    country_event_heatmap, country_year_list, fetch_medal_tally, men_vs_women,
    most_successful, most_successful_countrywise, participating_nations_over_time, preprocess,
    weight_v_height, yearwise_medal_tally, ProcessedTable, Selection, TallyKey,
};
use polars::prelude::*;
use std::collections::HashSet;

struct Raw {
    name: &'static str,
    sex: &'static str,
    team: &'static str,
    noc: &'static str,
    year: i32,
    city: &'static str,
    sport: &'static str,
    event: &'static str,
    medal: Option<&'static str>,
}

#[allow(clippy::too_many_arguments)]
fn raw(
    name: &'static str,
    sex: &'static str,
    noc: &'static str,
    year: i32,
    city: &'static str,
    sport: &'static str,
    event: &'static str,
    medal: Option<&'static str>,
) -> Raw {
    Raw { name, sex, team: noc, noc, year, city, sport, event, medal }
}

fn records_frame(rows: &[Raw]) -> DataFrame {
    let text = |f: fn(&Raw) -> &'static str| rows.iter().map(f).collect::<Vec<&str>>();

    df![
        "Name" => text(|r| r.name),
        "Sex" => text(|r| r.sex),
        "Age" => rows.iter().map(|_| Some(25.0)).collect::<Vec<Option<f64>>>(),
        "Height" => rows.iter().map(|_| None).collect::<Vec<Option<f64>>>(),
        "Weight" => rows.iter().map(|_| None).collect::<Vec<Option<f64>>>(),
        "Team" => text(|r| r.team),
        "NOC" => text(|r| r.noc),
        "Games" => rows.iter().map(|r| format!("{} Summer", r.year)).collect::<Vec<String>>(),
        "Year" => rows.iter().map(|r| r.year).collect::<Vec<i32>>(),
        "Season" => rows.iter().map(|_| "Summer").collect::<Vec<&str>>(),
        "City" => text(|r| r.city),
        "Sport" => text(|r| r.sport),
        "Event" => text(|r| r.event),
        "Medal" => rows.iter().map(|r| r.medal).collect::<Vec<Option<&str>>>(),
    ]
    .unwrap()
}

fn regions_frame() -> DataFrame {
    df![
        "NOC" => &["USA", "CHN", "GBR", "FRA", "KEN"],
        "region" => &["USA", "China", "UK", "France", "Kenya"],
    ]
    .unwrap()
}

fn dataset() -> Vec<Raw> {
    vec![
        // 2004: basketball team gold, two players
        raw("Tim Duncan", "M", "USA", 2004, "Athina", "Basketball", "Basketball Men's Basketball", Some("Bronze")),
        raw("Allen Iverson", "M", "USA", 2004, "Athina", "Basketball", "Basketball Men's Basketball", Some("Bronze")),
        raw("Michael Phelps", "M", "USA", 2004, "Athina", "Swimming", "Swimming Men's 200 metres Butterfly", Some("Gold")),
        raw("Michael Phelps", "M", "USA", 2004, "Athina", "Swimming", "Swimming Men's 100 metres Butterfly", Some("Gold")),
        raw("Liu Xiang", "M", "CHN", 2004, "Athina", "Athletics", "Athletics Men's 110 metres Hurdles", Some("Gold")),
        raw("Kelly Holmes", "F", "GBR", 2004, "Athina", "Athletics", "Athletics Women's 800 metres", Some("Gold")),
        raw("Laure Manaudou", "F", "FRA", 2004, "Athina", "Swimming", "Swimming Women's 400 metres Freestyle", Some("Gold")),
        raw("Paula Radcliffe", "F", "GBR", 2004, "Athina", "Athletics", "Athletics Women's Marathon", None),
        // 2008
        raw("Michael Phelps", "M", "USA", 2008, "Beijing", "Swimming", "Swimming Men's 200 metres Butterfly", Some("Gold")),
        raw("Guo Jingjing", "F", "CHN", 2008, "Beijing", "Diving", "Diving Women's Springboard", Some("Gold")),
        raw("Wu Minxia", "F", "CHN", 2008, "Beijing", "Diving", "Diving Women's Synchronized Springboard", Some("Gold")),
        raw("Guo Jingjing", "F", "CHN", 2008, "Beijing", "Diving", "Diving Women's Synchronized Springboard", Some("Gold")),
        raw("Rebecca Adlington", "F", "GBR", 2008, "Beijing", "Swimming", "Swimming Women's 800 metres Freestyle", Some("Gold")),
        raw("Samuel Wanjiru", "M", "KEN", 2008, "Beijing", "Athletics", "Athletics Men's Marathon", Some("Gold")),
        raw("Ryan Lochte", "M", "USA", 2008, "Beijing", "Swimming", "Swimming Men's 200 metres Backstroke", Some("Silver")),
        // 1900: women only
        raw("Charlotte Cooper", "F", "GBR", 1900, "Paris", "Tennis", "Tennis Women's Singles", Some("Gold")),
    ]
}

fn table() -> ProcessedTable {
    preprocess(&records_frame(&dataset()), &regions_frame()).unwrap()
}

#[test]
fn test_overall_tally_matches_distinct_team_medals() {
    let rows = dataset();
    let tally = fetch_medal_tally(&table(), &Selection::Overall, &Selection::Overall);

    for (medal, column) in [("Gold", 0usize), ("Silver", 1), ("Bronze", 2)] {
        let distinct: HashSet<(&str, &str, i32, &str, &str, &str)> = rows
            .iter()
            .filter(|r| r.medal == Some(medal))
            .map(|r| (r.team, r.noc, r.year, r.city, r.sport, r.event))
            .collect();

        let summed: u32 = tally
            .iter()
            .map(|row| [row.gold, row.silver, row.bronze][column])
            .sum();
        assert_eq!(summed as usize, distinct.len(), "{} total", medal);
    }
}

#[test]
fn test_country_year_list_strictly_ascending() {
    let (years, countries) = country_year_list(&table());

    assert_eq!(years[0], Selection::Overall);
    assert_eq!(countries[0], Selection::Overall);

    let years: Vec<i32> = years[1..].iter().filter_map(|y| y.specific().copied()).collect();
    assert_eq!(years, vec![1900, 2004, 2008]);
    assert!(years.windows(2).all(|w| w[0] < w[1]));

    let countries: Vec<&String> = countries[1..].iter().filter_map(|c| c.specific()).collect();
    assert_eq!(countries.len(), 5);
    assert!(countries.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_men_vs_women_has_no_gaps() {
    let rows = men_vs_women(&table());
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1900, 2004, 2008]);

    assert_eq!((rows[0].male, rows[0].female), (0, 1));
    // Phelps counted once in 2004
    assert_eq!((rows[1].male, rows[1].female), (4, 3));
    assert_eq!((rows[2].male, rows[2].female), (3, 3));
}

#[test]
fn test_heatmap_and_yearwise_follow_their_own_dedup() {
    let t = table();
    let rows = dataset();

    let usa_medal_rows = rows.iter().filter(|r| r.noc == "USA" && r.medal.is_some()).count();
    let usa_team_medals: HashSet<(i32, &str, &str, Option<&str>)> = rows
        .iter()
        .filter(|r| r.noc == "USA" && r.medal.is_some())
        .map(|r| (r.year, r.sport, r.event, r.medal))
        .collect();

    let yearwise: u32 = yearwise_medal_tally(&t, "USA").iter().map(|r| r.medal).sum();
    let heatmap = country_event_heatmap(&t, "USA");

    assert_eq!(yearwise as usize, usa_medal_rows);
    assert_eq!(heatmap.total() as usize, usa_team_medals.len());
    assert_ne!(yearwise, heatmap.total());
}

#[test]
fn test_basketball_team_gold_counts_once_for_country() {
    let rows = vec![
        raw("Tim Duncan", "M", "USA", 2004, "Athens", "Basketball", "Basketball Men's Basketball", Some("Gold")),
        raw("Allen Iverson", "M", "USA", 2004, "Athens", "Basketball", "Basketball Men's Basketball", Some("Gold")),
    ];
    let t = preprocess(&records_frame(&rows), &regions_frame()).unwrap();

    let tally = fetch_medal_tally(&t, &Selection::Overall, &Selection::from_value("USA"));
    assert_eq!(tally.len(), 1);
    assert_eq!(tally[0].key, TallyKey::Year(2004));
    assert_eq!(tally[0].gold, 1);

    let athletes = most_successful(&t, &Selection::from_value("Basketball"));
    assert_eq!(athletes.len(), 2);
    assert!(athletes.iter().all(|a| a.medals == 1));
}

#[test]
fn test_null_region_counted_as_nation_but_not_offered() {
    let rows = vec![
        raw("Kelly Holmes", "F", "GBR", 2004, "Athina", "Athletics", "Athletics Women's 800 metres", Some("Gold")),
        raw("Refugee Runner", "M", "ROT", 2004, "Athina", "Athletics", "Athletics Men's 800 metres", None),
    ];
    let t = preprocess(&records_frame(&rows), &regions_frame()).unwrap();

    let (_, countries) = country_year_list(&t);
    assert_eq!(countries, vec![Selection::Overall, Selection::from_value("UK")]);

    let nations = participating_nations_over_time(&t);
    assert_eq!(nations.len(), 1);
    assert_eq!(nations[0].nations, 2);
}

#[test]
fn test_unknown_filter_values_are_empty_not_errors() {
    let t = table();
    assert!(fetch_medal_tally(&t, &Selection::Only(1896), &Selection::Overall).is_empty());
    assert!(yearwise_medal_tally(&t, "Atlantis").is_empty());
    assert!(country_event_heatmap(&t, "Atlantis").is_empty());
    assert!(most_successful_countrywise(&t, "Atlantis").is_empty());
    assert!(most_successful(&t, &Selection::from_value("Quidditch")).is_empty());
    assert!(weight_v_height(&t, &Selection::from_value("Quidditch")).is_empty());

    assert!(t.check_year(&Selection::Only(1896)).is_err());
    assert!(t.check_sport(&Selection::from_value("Quidditch")).is_err());
}

#[test]
fn test_queries_are_idempotent() {
    let t = table();

    let tally = fetch_medal_tally(&t, &Selection::Overall, &Selection::Overall);
    assert_eq!(tally, fetch_medal_tally(&t, &Selection::Overall, &Selection::Overall));

    let athletes = most_successful(&t, &Selection::Overall);
    assert_eq!(athletes, most_successful(&t, &Selection::Overall));

    let heatmap = country_event_heatmap(&t, "China");
    assert_eq!(heatmap, country_event_heatmap(&t, "China"));

    let physique = weight_v_height(&t, &Selection::Overall);
    assert_eq!(physique, weight_v_height(&t, &Selection::Overall));
}
