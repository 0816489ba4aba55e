// src/services/inventory_service.rs

use validator::Validate;

use crate::{
    client::{DevelopmentRepository, PropertyTypeRepository, UnitRepository},
    common::error::AppError,
    models::{
        common::EntityId,
        developments::{Development, DevelopmentInput},
        inventory::{DevelopmentUnit, PropertyType, PropertyTypeInput, PropertyTypeRow, UnitGroup, UnitInput},
    },
    services::grouping::{self, ExpandedGroups},
};

#[derive(Clone)]
pub struct InventoryService {
    property_types: PropertyTypeRepository,
    units: UnitRepository,
    developments: DevelopmentRepository,
}

impl InventoryService {
    pub fn new(
        property_types: PropertyTypeRepository,
        units: UnitRepository,
        developments: DevelopmentRepository,
    ) -> Self {
        Self { property_types, units, developments }
    }

    // =========================================================================
    //  1. TIPOS DE IMÓVEL
    // =========================================================================

    pub async fn grouped_property_types(&self, search: Option<&str>) -> Result<Vec<PropertyTypeRow>, AppError> {
        let items = self.property_types.list().await?;
        Ok(grouping::group_property_types(&items, search))
    }

    pub async fn create_property_type(&self, input: PropertyTypeInput) -> Result<PropertyType, AppError> {
        let input = input.trimmed();
        input.validate()?;
        if input.parent_id.is_some() {
            let existing = self.property_types.list().await?;
            check_nesting(None, input.parent_id.as_ref(), &existing)?;
        }
        self.property_types.create(&input).await
    }

    pub async fn update_property_type(&self, id: &EntityId, input: PropertyTypeInput) -> Result<PropertyType, AppError> {
        let input = input.trimmed();
        input.validate()?;
        if input.parent_id.is_some() {
            let existing = self.property_types.list().await?;
            check_nesting(Some(id), input.parent_id.as_ref(), &existing)?;
        }
        self.property_types.update(id, &input).await
    }

    // =========================================================================
    //  2. EMPREENDIMENTOS E UNIDADES
    // =========================================================================

    pub async fn create_development(&self, input: DevelopmentInput) -> Result<Development, AppError> {
        let input = input.trimmed();
        input.validate()?;
        self.developments.create(&input).await
    }

    pub async fn update_development(&self, id: &EntityId, input: DevelopmentInput) -> Result<Development, AppError> {
        let input = input.trimmed();
        input.validate()?;
        self.developments.update(id, &input).await
    }

    pub async fn create_unit(&self, input: UnitInput) -> Result<DevelopmentUnit, AppError> {
        let input = input.trimmed();
        input.validate()?;
        check_discount(&input)?;
        self.units.create(&input).await
    }

    pub async fn update_unit(&self, id: &EntityId, input: UnitInput) -> Result<DevelopmentUnit, AppError> {
        let input = input.trimmed();
        input.validate()?;
        check_discount(&input)?;
        self.units.update(id, &input).await
    }

    /// Unidades agrupadas por empreendimento. As duas listas são buscadas em paralelo.
    pub async fn grouped_units(&self, expanded: &ExpandedGroups) -> Result<Vec<UnitGroup>, AppError> {
        let (units, developments) = tokio::try_join!(self.units.list(), self.developments.list())?;
        Ok(grouping::group_units_by_development(&units, &developments, expanded))
    }
}

/// Só um nível de hierarquia: o pai precisa existir, ser raiz e não ser o próprio tipo.
/// Um tipo que já tem filhos também não pode virar filho.
pub fn check_nesting(
    id: Option<&EntityId>,
    parent_id: Option<&EntityId>,
    existing: &[PropertyType],
) -> Result<(), AppError> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    if id == Some(parent_id) {
        return Err(AppError::BusinessRule("Un tipo no puede ser su propio padre".to_string()));
    }

    let parent = existing
        .iter()
        .find(|t| &t.id == parent_id)
        .ok_or_else(|| AppError::BusinessRule("El tipo padre no existe".to_string()))?;

    if parent.parent_id.is_some() {
        return Err(AppError::BusinessRule(
            "Solo se permite un nivel de subtipos".to_string(),
        ));
    }

    if let Some(id) = id {
        if existing.iter().any(|t| t.parent_id.as_ref() == Some(id)) {
            return Err(AppError::BusinessRule(
                "Un tipo con subtipos no puede tener padre".to_string(),
            ));
        }
    }

    Ok(())
}

fn check_discount(input: &UnitInput) -> Result<(), AppError> {
    match input.discount_price {
        Some(discount) if discount > input.price => Err(AppError::BusinessRule(
            "El precio con descuento no puede superar el precio".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(id: i64, name: &str, parent: Option<i64>) -> PropertyType {
        PropertyType {
            id: EntityId::Number(id),
            name: name.into(),
            description: None,
            active: Some(true),
            parent_id: parent.map(EntityId::Number),
            parent_name: None,
        }
    }

    fn catalog() -> Vec<PropertyType> {
        vec![pt(1, "Casa", None), pt(2, "Dúplex", Some(1)), pt(3, "Terreno", None)]
    }

    #[test]
    fn root_parent_is_accepted() {
        assert!(check_nesting(None, Some(&EntityId::Number(1)), &catalog()).is_ok());
        assert!(check_nesting(Some(&EntityId::Number(3)), Some(&EntityId::Number(1)), &catalog()).is_ok());
        assert!(check_nesting(None, None, &[]).is_ok());
    }

    #[test]
    fn grandchildren_are_rejected() {
        let err = check_nesting(None, Some(&EntityId::Number(2)), &catalog()).unwrap_err();
        assert_eq!(err.user_message(), "Solo se permite un nivel de subtipos");
    }

    #[test]
    fn self_missing_and_parent_with_children_are_rejected() {
        let own = check_nesting(Some(&EntityId::Number(3)), Some(&EntityId::Number(3)), &catalog());
        assert!(matches!(own, Err(AppError::BusinessRule(_))));

        let missing = check_nesting(None, Some(&EntityId::Number(99)), &catalog());
        assert_eq!(missing.unwrap_err().user_message(), "El tipo padre no existe");

        // Casa tem filhos: não pode passar a ser subtipo de Terreno
        let has_children = check_nesting(Some(&EntityId::Number(1)), Some(&EntityId::Number(3)), &catalog());
        assert!(matches!(has_children, Err(AppError::BusinessRule(_))));
    }
}
