// src/services/stats.rs

// Redutores puros para os cards do dashboard. Recalculados a cada carga.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::models::dashboard::TypeStat;

pub const RECENT_WINDOW_DAYS: i64 = 7;
pub const TOP_LIMIT: usize = 3;

/// Conta as ocorrências de cada valor do discriminante numa única passada.
pub fn count_by<T, K, F>(items: &[T], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// `count / total * 100`, zero quando não há total.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Contagem + percentual por chave; maior contagem primeiro, empate pela chave.
pub fn type_stats<T, F>(items: &[T], key: F) -> Vec<TypeStat>
where
    F: Fn(&T) -> String,
{
    let total = items.len();
    let mut stats: Vec<TypeStat> = count_by(items, key)
        .into_iter()
        .map(|(key, count)| TypeStat { key, count, percentage: percentage(count, total) })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    stats
}

/// Soma linear; valores ausentes contam como zero.
pub fn sum_by<T, F>(items: &[T], value: F) -> Decimal
where
    F: Fn(&T) -> Option<Decimal>,
{
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + value(item).unwrap_or(Decimal::ZERO))
}

/// Quantos foram criados nos últimos 7 dias em relação a `now`.
pub fn recent_count<T, F>(items: &[T], created_at: F, now: DateTime<Utc>) -> usize
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let since = now - Duration::days(RECENT_WINDOW_DAYS);
    items
        .iter()
        .filter_map(|item| created_at(item))
        .filter(|ts| *ts >= since && *ts <= now)
        .count()
}

/// Os `limit` maiores pela métrica. Ordenação estável: empates mantêm a ordem original.
pub fn top_by<T, M, F>(items: &[T], metric: F, limit: usize) -> Vec<&T>
where
    M: Ord,
    F: Fn(&T) -> M,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| metric(b).cmp(&metric(a)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_never_divides_by_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn type_stats_of_nothing_is_empty() {
        let empty: Vec<&str> = vec![];
        assert!(type_stats(&empty, |s| s.to_string()).is_empty());
    }

    #[test]
    fn type_stats_counts_and_orders() {
        let items = vec!["lead", "client", "lead", "owner", "lead", "client"];
        let stats = type_stats(&items, |s| s.to_string());

        assert_eq!(stats[0], TypeStat { key: "lead".into(), count: 3, percentage: 50.0 });
        assert_eq!(stats[1].key, "client");
        assert_eq!(stats[2].key, "owner");
        let total: f64 = stats.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn sum_treats_missing_values_as_zero() {
        let values = vec![Some(Decimal::new(1050, 2)), None, Some(Decimal::from(4))];
        assert_eq!(sum_by(&values, |v| *v), Decimal::new(1450, 2));
        let none: Vec<Option<Decimal>> = vec![];
        assert_eq!(sum_by(&none, |v| *v), Decimal::ZERO);
    }

    #[test]
    fn recent_count_uses_a_trailing_week() {
        let now = Utc::now();
        let stamps = vec![
            Some(now - Duration::days(1)),
            Some(now - Duration::days(6) - Duration::hours(23)),
            Some(now - Duration::days(8)),
            None,
            Some(now + Duration::days(1)),
        ];
        assert_eq!(recent_count(&stamps, |ts| *ts, now), 2);
    }

    #[test]
    fn top_keeps_original_order_on_ties() {
        let items = vec![("a", 5), ("b", 9), ("c", 5), ("d", 1), ("e", 9)];
        let top: Vec<&str> = top_by(&items, |(_, views)| *views, TOP_LIMIT)
            .into_iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(top, vec!["b", "e", "a"]);

        let short = vec![("x", 1)];
        assert_eq!(top_by(&short, |(_, v)| *v, TOP_LIMIT).len(), 1);
    }
}
