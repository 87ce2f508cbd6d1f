// ============================================================================
// Alignement calendaire
// ============================================================================
// Aligne les années par label mois-jour ("MM-DD") au lieu du rang du jour
// de trading. Les jours absents restent des trous : pas d'interpolation,
// pas de report de la valeur précédente.
//
// Le 29 février n'existe que pour les années bissextiles : les autres
// années ont un trou sur cette ligne.
// ============================================================================

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::NormalizedSeries;

/// Table calendaire : une ligne par label mois-jour, une colonne par année
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarTable {
    /// Labels "MM-DD" triés (l'ordre lexicographique est l'ordre du calendrier)
    labels: Vec<String>,
    /// Pour chaque année, une cellule par label (None = jour absent)
    columns: BTreeMap<i32, Vec<Option<f64>>>,
}

impl CalendarTable {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Nombre de lignes (labels mois-jour)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.keys().copied()
    }

    /// Colonne d'une année, alignée sur `labels()`
    pub fn column(&self, year: i32) -> Option<&[Option<f64>]> {
        self.columns.get(&year).map(Vec::as_slice)
    }

    /// Valeur d'une année pour un label donné, None si absente
    pub fn value(&self, label: &str, year: i32) -> Option<f64> {
        let row = self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()?;
        self.columns.get(&year)?.get(row).copied().flatten()
    }
}

/// Construit la table calendaire des séries données
///
/// Les lignes sont l'union des labels mois-jour de toutes les années.
/// Si une année contenait deux fois le même label, la première valeur
/// serait retenue.
pub fn calendar_align<'a, I>(series: I) -> CalendarTable
where
    I: IntoIterator<Item = &'a NormalizedSeries>,
{
    // Une map label → valeur par année
    let per_year: Vec<(i32, HashMap<String, f64>)> = series
        .into_iter()
        .map(|s| {
            let mut values = HashMap::with_capacity(s.len());
            for (label, value) in s.month_day_values() {
                values.entry(label).or_insert(value);
            }
            (s.year(), values)
        })
        .collect();

    let labels: Vec<String> = per_year
        .iter()
        .flat_map(|(_, values)| values.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = per_year
        .into_iter()
        .map(|(year, values)| {
            let column = labels.iter().map(|l| values.get(l).copied()).collect();
            (year, column)
        })
        .collect();

    CalendarTable { labels, columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalize;
    use crate::models::{PricePoint, YearSeries};
    use chrono::NaiveDate;

    fn series(year: i32, days: &[(u32, u32, f64)]) -> NormalizedSeries {
        let points = days
            .iter()
            .map(|&(m, d, c)| PricePoint::new(NaiveDate::from_ymd_opt(year, m, d).unwrap(), c))
            .collect();
        normalize(&YearSeries::new(year, points).unwrap()).unwrap()
    }

    #[test]
    fn test_leap_day_gap() {
        // 2003 n'est pas bissextile, 2004 l'est
        let x = series(2003, &[(2, 27, 8.0), (2, 28, 10.0), (3, 3, 12.0)]);
        let y = series(2004, &[(2, 27, 20.0), (2, 29, 25.0), (3, 1, 30.0)]);

        let table = calendar_align([&x, &y]);

        assert_eq!(table.labels(), &["02-27", "02-28", "02-29", "03-01", "03-03"]);
        assert_eq!(table.value("02-29", 2003), None);
        assert_eq!(table.value("02-29", 2004), Some(125.0));
        assert_eq!(table.value("02-28", 2004), None);
        assert_eq!(table.value("03-03", 2003), Some(150.0));
    }

    #[test]
    fn test_columns_aligned_with_labels() {
        let x = series(2001, &[(1, 2, 50.0), (1, 3, 100.0)]);
        let y = series(2002, &[(1, 3, 10.0)]);

        let table = calendar_align([&x, &y]);

        assert_eq!(table.years().collect::<Vec<_>>(), vec![2001, 2002]);
        assert_eq!(table.column(2001), Some(&[Some(100.0), Some(200.0)][..]));
        assert_eq!(table.column(2002), Some(&[None, Some(100.0)][..]));
        assert_eq!(table.column(1999), None);
    }

    #[test]
    fn test_empty_input() {
        let table = calendar_align(std::iter::empty::<&NormalizedSeries>());
        assert!(table.is_empty());
    }
}
