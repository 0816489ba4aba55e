// src/services/grouping.rs

//! Ordenação hierárquica das listagens.
//!
//! - Tipos de imóvel: raiz seguida dos filhos diretos, órfãos no final.
//!   Com termo de busca o agrupamento é ignorado (lista plana).
//! - Unidades: agrupadas por empreendimento, com estado de expandido/recolhido.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::{
    common::EntityId,
    developments::Development,
    inventory::{DevelopmentUnit, GroupRole, PropertyType, PropertyTypeRow, UnitGroup, UnitStatus},
};

// =========================================================================
//  COMPARAÇÃO DE NOMES
// =========================================================================

/// Chave de ordenação sem distinção de maiúsculas e acentos.
/// O "ñ" vira "n~" para ficar depois de todo "n" e antes de "o", como no espanhol.
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        match ch {
            'á' | 'à' | 'â' | 'ä' | 'ã' => key.push('a'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'í' | 'ì' | 'î' | 'ï' => key.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => key.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => key.push('u'),
            'ç' => key.push('c'),
            'ñ' => key.push_str("n~"),
            other => key.push(other),
        }
    }
    key
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn compare_property_types(a: &PropertyType, b: &PropertyType) -> Ordering {
    compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
}

/// Comparação "natural": trechos numéricos são comparados pelo valor ("2" < "10").
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_num = take_digits(&mut left);
                let r_num = take_digits(&mut right);
                let l_trim = l_num.trim_start_matches('0');
                let r_trim = r_num.trim_start_matches('0');
                let ord = l_trim
                    .len()
                    .cmp(&r_trim.len())
                    .then_with(|| l_trim.cmp(r_trim));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = collation_key(&l.to_string()).cmp(&collation_key(&r.to_string()));
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(ch) = chars.peek().copied() {
        if !ch.is_ascii_digit() {
            break;
        }
        digits.push(ch);
        chars.next();
    }
    digits
}

// =========================================================================
//  TIPOS DE IMÓVEL
// =========================================================================

fn matches_term(pt: &PropertyType, needle: &str) -> bool {
    let hit = |text: &str| collation_key(text).contains(needle);
    hit(&pt.name)
        || pt.description.as_deref().is_some_and(hit)
        || pt.parent_name.as_deref().is_some_and(hit)
}

/// Monta a ordem de exibição dos tipos de imóvel.
///
/// Sem busca: raízes em ordem alfabética, cada uma seguida dos filhos diretos;
/// quem aponta para um pai que não é raiz (inexistente ou neto) vai para o
/// segmento de órfãos no final. Com busca: só os que casam, em lista plana.
pub fn group_property_types(items: &[PropertyType], search: Option<&str>) -> Vec<PropertyTypeRow> {
    let term = search.map(str::trim).filter(|t| !t.is_empty());

    if let Some(term) = term {
        let needle = collation_key(term);
        let mut matches: Vec<&PropertyType> = items.iter().filter(|pt| matches_term(pt, &needle)).collect();
        matches.sort_by(|a, b| compare_property_types(a, b));
        return matches
            .into_iter()
            .map(|pt| row(pt, GroupRole::Match, 0))
            .collect();
    }

    let mut roots: Vec<&PropertyType> = items.iter().filter(|pt| pt.parent_id.is_none()).collect();
    roots.sort_by(|a, b| compare_property_types(a, b));
    let root_ids: HashSet<&EntityId> = roots.iter().map(|pt| &pt.id).collect();

    let mut children: HashMap<&EntityId, Vec<&PropertyType>> = HashMap::new();
    let mut orphans: Vec<&PropertyType> = Vec::new();

    for pt in items {
        if let Some(parent_id) = &pt.parent_id {
            if root_ids.contains(parent_id) {
                children.entry(parent_id).or_default().push(pt);
            } else {
                orphans.push(pt);
            }
        }
    }

    let mut rows = Vec::with_capacity(items.len());
    for root in roots {
        rows.push(row(root, GroupRole::Root, 0));
        // remove: se dois registros raiz tiverem o mesmo id, os filhos saem só uma vez
        if let Some(mut kids) = children.remove(&root.id) {
            kids.sort_by(|a, b| compare_property_types(a, b));
            rows.extend(kids.into_iter().map(|kid| row(kid, GroupRole::Child, 1)));
        }
    }

    orphans.sort_by(|a, b| compare_property_types(a, b));
    rows.extend(orphans.into_iter().map(|pt| row(pt, GroupRole::Orphan, 0)));
    rows
}

fn row(pt: &PropertyType, role: GroupRole, depth: u8) -> PropertyTypeRow {
    PropertyTypeRow { role, depth, property_type: pt.clone() }
}

// =========================================================================
//  UNIDADES POR EMPREENDIMENTO
// =========================================================================

/// Conjunto de grupos expandidos. Tudo começa recolhido.
#[derive(Debug, Clone, Default)]
pub struct ExpandedGroups {
    ids: HashSet<String>,
}

impl ExpandedGroups {
    /// Lê a lista separada por vírgulas vinda da query (`?expanded=1,7`).
    pub fn from_query(raw: Option<&str>) -> Self {
        let ids = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    pub fn is_expanded(&self, development_id: &EntityId) -> bool {
        self.ids.contains(&development_id.to_string())
    }

    /// Inverte o estado de um grupo; devolve `true` se ele ficou expandido.
    pub fn toggle(&mut self, development_id: &EntityId) -> bool {
        let key = development_id.to_string();
        if !self.ids.remove(&key) {
            self.ids.insert(key);
            return true;
        }
        false
    }
}

pub fn group_units_by_development(
    units: &[DevelopmentUnit],
    developments: &[Development],
    expanded: &ExpandedGroups,
) -> Vec<UnitGroup> {
    let titles: HashMap<&EntityId, &str> = developments
        .iter()
        .map(|d| (&d.id, d.title.as_str()))
        .collect();

    let mut buckets: HashMap<&EntityId, Vec<&DevelopmentUnit>> = HashMap::new();
    for unit in units {
        buckets.entry(&unit.development_id).or_default().push(unit);
    }

    let mut groups: Vec<UnitGroup> = buckets
        .into_iter()
        .map(|(development_id, mut members)| {
            members.sort_by(|a, b| natural_cmp(&a.unit_number, &b.unit_number).then_with(|| a.id.cmp(&b.id)));
            let title = titles
                .get(development_id)
                .map(|t| t.to_string())
                .unwrap_or_else(|| development_id.to_string());
            let available_units = members.iter().filter(|u| u.status == UnitStatus::Available).count();
            UnitGroup {
                development_id: development_id.clone(),
                development_title: title,
                expanded: expanded.is_expanded(development_id),
                total_units: members.len(),
                available_units,
                units: members.into_iter().cloned().collect(),
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        compare_names(&a.development_title, &b.development_title)
            .then_with(|| a.development_id.cmp(&b.development_id))
    });
    groups
}
