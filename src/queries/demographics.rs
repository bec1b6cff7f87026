//! Athlete Demographics
//!
//! Every query here works on athletes, not appearances: a swimmer entered in six
//! events is one data point. `weight_v_height` and the age series keep the first
//! row of each (Name, region); `men_vs_women` keeps one row per (Name, region, Year)
//! so an athlete counts once in every edition they attended.

use crate::table::{Medal, ParticipationRecord, ProcessedTable, Selection, Sex};
use crate::utils::{distinct_by, mean, median};
use serde::Serialize;
use std::collections::BTreeMap;

/// Medal outcome with non-podium results as an explicit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MedalCategory {
    Gold,
    Silver,
    Bronze,
    #[serde(rename = "No Medal")]
    NoMedal,
}

impl From<Option<Medal>> for MedalCategory {
    fn from(medal: Option<Medal>) -> Self {
        match medal {
            Some(Medal::Gold) => MedalCategory::Gold,
            Some(Medal::Silver) => MedalCategory::Silver,
            Some(Medal::Bronze) => MedalCategory::Bronze,
            None => MedalCategory::NoMedal,
        }
    }
}

/// One athlete in the height/weight scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysiqueRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Sex")]
    pub sex: Option<Sex>,
    #[serde(rename = "Height")]
    pub height: Option<f64>,
    #[serde(rename = "Weight")]
    pub weight: Option<f64>,
    #[serde(rename = "Medal")]
    pub medal: MedalCategory,
    #[serde(rename = "Sport")]
    pub sport: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Male")]
    pub male: u32,
    #[serde(rename = "Female")]
    pub female: u32,
}

/// Ages of one athlete group plus summary figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSeries {
    pub label: String,
    pub ages: Vec<f64>,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

impl AgeSeries {
    fn new<'a>(label: &str, rows: impl Iterator<Item = &'a ParticipationRecord>) -> Self {
        let ages: Vec<f64> = rows.filter_map(|r| r.age).collect();
        Self {
            label: label.to_string(),
            count: ages.len(),
            mean: mean(&ages),
            median: median(&ages),
            ages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDistribution {
    pub overall: AgeSeries,
    pub gold: AgeSeries,
    pub silver: AgeSeries,
    pub bronze: AgeSeries,
}

/// Per-athlete rows for the height vs weight scatter, optionally for one sport
///
/// The sport filter applies after athlete de-duplication, so an athlete shows up
/// under the sport of their first recorded appearance.
pub fn weight_v_height(table: &ProcessedTable, sport: &Selection<String>) -> Vec<PhysiqueRow> {
    if let Err(unknown) = table.check_sport(sport) {
        tracing::debug!("weight_v_height: {}, returning no athletes", unknown);
        return Vec::new();
    }

    table
        .athlete_deduplicated()
        .into_iter()
        .filter(|r| sport.specific().map_or(true, |s| r.sport == *s))
        .map(|r| PhysiqueRow {
            name: r.name.clone(),
            sex: r.sex,
            height: r.height,
            weight: r.weight,
            medal: MedalCategory::from(r.medal),
            sport: r.sport.clone(),
            region: r.region.clone(),
        })
        .collect()
}

/// Distinct male and female athletes per edition, ascending by Year
///
/// A year where only one sex competed still appears, with 0 for the other.
pub fn men_vs_women(table: &ProcessedTable) -> Vec<GenderRow> {
    let athletes = distinct_by(table.records().iter(), |r| {
        (r.name.as_str(), r.region.as_deref(), r.year)
    });

    let mut by_year: BTreeMap<i32, (u32, u32)> = BTreeMap::new();
    for record in athletes {
        match record.sex {
            Some(Sex::Male) => by_year.entry(record.year).or_default().0 += 1,
            Some(Sex::Female) => by_year.entry(record.year).or_default().1 += 1,
            None => {}
        }
    }

    by_year
        .into_iter()
        .map(|(year, (male, female))| GenderRow { year, male, female })
        .collect()
}

/// Age series of all athletes and of each medal class
pub fn age_distribution(table: &ProcessedTable) -> AgeDistribution {
    let athletes = table.athlete_deduplicated();

    AgeDistribution {
        overall: AgeSeries::new("Overall", athletes.iter().copied()),
        gold: AgeSeries::new("Gold Medalists", with_medal(&athletes, Medal::Gold)),
        silver: AgeSeries::new("Silver Medalists", with_medal(&athletes, Medal::Silver)),
        bronze: AgeSeries::new("Bronze Medalists", with_medal(&athletes, Medal::Bronze)),
    }
}

fn with_medal<'a>(
    athletes: &'a [&'a ParticipationRecord],
    medal: Medal,
) -> impl Iterator<Item = &'a ParticipationRecord> + 'a {
    athletes.iter().copied().filter(move |r| r.medal == Some(medal))
}

/// Ages of gold medalists, one series per sport
///
/// An empty `sports` list means every sport in the table. Sports absent from the
/// table are skipped.
pub fn gold_medalist_ages_by_sport(table: &ProcessedTable, sports: &[String]) -> Vec<AgeSeries> {
    let athletes = table.athlete_deduplicated();
    let wanted: &[String] = if sports.is_empty() { table.sports() } else { sports };

    wanted
        .iter()
        .filter(|sport| {
            let known = table.has_sport(sport);
            if !known {
                tracing::debug!("gold_medalist_ages_by_sport: unknown sport '{}'", sport);
            }
            known
        })
        .map(|sport| {
            AgeSeries::new(
                sport,
                athletes
                    .iter()
                    .copied()
                    .filter(|r| r.medal == Some(Medal::Gold) && r.sport == *sport),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::fixtures::{row, table, B, G, NONE, S};
    use approx::assert_relative_eq;

    #[test]
    fn test_weight_v_height_one_row_per_athlete() {
        let t = table(vec![
            row("Michael", Some("USA"), 2004, "Swimming", "100m", G).physique(193.0, 88.0),
            row("Michael", Some("USA"), 2004, "Swimming", "200m", S).physique(193.0, 88.0),
            row("Laure", Some("France"), 2004, "Swimming", "400m", NONE).female(),
            row("Teddy", Some("France"), 2012, "Judo", "Heavy", B).physique(204.0, 140.0),
        ]);

        let all = weight_v_height(&t, &Selection::Overall);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].medal, MedalCategory::Gold);
        assert_eq!(all[1].medal, MedalCategory::NoMedal);
        assert_eq!(all[1].sex, Some(Sex::Female));
        assert_eq!(all[1].height, None);

        let judo = weight_v_height(&t, &Selection::from_value("Judo"));
        assert_eq!(judo.len(), 1);
        assert_eq!(judo[0].weight, Some(140.0));

        assert!(weight_v_height(&t, &Selection::from_value("Quidditch")).is_empty());
    }

    #[test]
    fn test_no_medal_category_serializes_with_space() {
        let json = serde_json::to_value(MedalCategory::NoMedal).unwrap();
        assert_eq!(json, "No Medal");
    }

    #[test]
    fn test_men_vs_women_outer_join() {
        let t = table(vec![
            row("Spyridon", Some("Greece"), 1896, "Athletics", "Marathon", G),
            row("Spyridon", Some("Greece"), 1896, "Athletics", "10k", NONE),
            row("Alfred", Some("Hungary"), 1896, "Swimming", "100m", G),
            row("Charlotte", Some("UK"), 1900, "Tennis", "Singles", G).female(),
            row("Hélène", Some("Switzerland"), 1900, "Sailing", "Open", G).female(),
            row("Alfred", Some("Hungary"), 1900, "Swimming", "100m", NONE),
            row("Sonja", Some("Norway"), 1924, "Figure Skating", "Singles", NONE).female(),
        ]);

        let rows = men_vs_women(&t);
        assert_eq!(
            rows,
            vec![
                GenderRow { year: 1896, male: 2, female: 0 },
                GenderRow { year: 1900, male: 1, female: 2 },
                GenderRow { year: 1924, male: 0, female: 1 },
            ]
        );
    }

    #[test]
    fn test_age_distribution() {
        let t = table(vec![
            row("A", Some("USA"), 2000, "Rowing", "Eights", G).age(20.0),
            row("A", Some("USA"), 2004, "Rowing", "Eights", G).age(24.0),
            row("B", Some("USA"), 2000, "Rowing", "Pairs", S).age(30.0),
            row("C", Some("USA"), 2000, "Rowing", "Fours", NONE).age(25.0),
            row("D", Some("USA"), 2000, "Rowing", "Singles", NONE),
        ]);

        let dist = age_distribution(&t);
        assert_eq!(dist.overall.count, 3);
        assert_relative_eq!(dist.overall.mean.unwrap(), 25.0);
        assert_eq!(dist.gold.ages, vec![20.0]);
        assert_eq!(dist.silver.count, 1);
        assert_eq!(dist.bronze.count, 0);
        assert!(dist.bronze.mean.is_none());
    }

    #[test]
    fn test_gold_medalist_ages_by_sport() {
        let t = table(vec![
            row("A", Some("USA"), 2000, "Rowing", "Eights", G).age(28.0),
            row("B", Some("USA"), 2000, "Rowing", "Pairs", G).age(32.0),
            row("C", Some("USA"), 2000, "Gymnastics", "Floor", G).age(16.0),
            row("D", Some("USA"), 2000, "Gymnastics", "Vault", S).age(19.0),
        ]);

        let series = gold_medalist_ages_by_sport(
            &t,
            &["Gymnastics".to_string(), "Quidditch".to_string(), "Rowing".to_string()],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Gymnastics");
        assert_eq!(series[0].ages, vec![16.0]);
        assert_relative_eq!(series[1].median.unwrap(), 30.0);

        let every_sport = gold_medalist_ages_by_sport(&t, &[]);
        assert_eq!(every_sport.len(), 2);
    }
}
