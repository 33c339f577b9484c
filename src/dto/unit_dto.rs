//! DTOs de actualización de unidades
//!
//! Convierte el mapa campo/valor que envía el cliente en un `UnitPatch`
//! tipado. Solo los campos de la lista permitida llegan a la unidad; el
//! resto se rechaza con detalle por campo.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use crate::models::{FleetUnit, UnitStatus};
use crate::utils::validation::{
    expect_integer, expect_string, validate_date, validate_enum, validate_length, validate_range,
};

/// Mapa campo/valor tal y como llega en el body (JSON o formulario)
pub type FieldMap = Map<String, Value>;

const TEXT_MIN: usize = 1;
const TEXT_MAX: usize = 100;

/// Actualización parcial ya validada de una unidad
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnitPatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub status: Option<UnitStatus>,
    pub location: Option<String>,
    pub battery_level: Option<u8>,
    pub last_maintenance: Option<NaiveDate>,
    pub assigned_task: Option<String>,
}

impl UnitPatch {
    /// Valida campo a campo y acumula todos los errores encontrados
    pub fn from_fields(fields: &FieldMap) -> Result<Self, ValidationErrors> {
        let mut patch = UnitPatch::default();
        let mut errors = ValidationErrors::new();

        for (key, value) in fields {
            match key.as_str() {
                "name" => collect(&mut errors, "name", text(value), &mut patch.name),
                "model" => collect(&mut errors, "model", text(value), &mut patch.model),
                "location" => collect(&mut errors, "location", text(value), &mut patch.location),
                "assignedTask" => {
                    collect(&mut errors, "assignedTask", text(value), &mut patch.assigned_task)
                }
                "status" => collect(&mut errors, "status", status(value), &mut patch.status),
                "batteryLevel" => collect(
                    &mut errors,
                    "batteryLevel",
                    battery_level(value),
                    &mut patch.battery_level,
                ),
                "lastMaintenance" => collect(
                    &mut errors,
                    "lastMaintenance",
                    expect_string(value).and_then(validate_date),
                    &mut patch.last_maintenance,
                ),
                "id" => {
                    let mut error = ValidationError::new("immutable");
                    error.message = Some("id cannot be changed".into());
                    errors.add("id", error);
                }
                other => {
                    let mut error = ValidationError::new("unknown_field");
                    error.add_param("field".into(), &other.to_string());
                    error.message = Some(format!("'{}' is not an editable field", other).into());
                    errors.add("unknown_field", error);
                }
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }

    /// Sobrescribe en la unidad los campos presentes; el id nunca cambia
    pub fn apply(self, unit: &mut FleetUnit) {
        if let Some(name) = self.name {
            unit.name = name;
        }
        if let Some(model) = self.model {
            unit.model = model;
        }
        if let Some(status) = self.status {
            unit.status = status;
        }
        if let Some(location) = self.location {
            unit.location = location;
        }
        if let Some(battery_level) = self.battery_level {
            unit.battery_level = battery_level;
        }
        if let Some(last_maintenance) = self.last_maintenance {
            unit.last_maintenance = last_maintenance;
        }
        if let Some(assigned_task) = self.assigned_task {
            unit.assigned_task = assigned_task;
        }
    }
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
    slot: &mut Option<T>,
) {
    match result {
        Ok(value) => *slot = Some(value),
        Err(error) => errors.add(field, error),
    }
}

fn text(value: &Value) -> Result<String, ValidationError> {
    expect_string(value).and_then(|s| validate_length(s, TEXT_MIN, TEXT_MAX))
}

fn status(value: &Value) -> Result<UnitStatus, ValidationError> {
    let raw = expect_string(value)?;
    let matched = validate_enum(raw, &UnitStatus::ALL)?;
    matched.parse::<UnitStatus>().map_err(|_| ValidationError::new("enum"))
}

fn battery_level(value: &Value) -> Result<u8, ValidationError> {
    let level = validate_range(expect_integer(value)?, 0, 100)?;
    u8::try_from(level).map_err(|_| ValidationError::new("range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_patch() {
        let patch = UnitPatch::from_fields(&fields(json!({
            "status": "Maintenance",
            "batteryLevel": "42",
            "lastMaintenance": "2024-01-15",
            "assignedTask": "  Inventory  "
        })))
        .unwrap();

        assert_eq!(patch.status, Some(UnitStatus::Maintenance));
        assert_eq!(patch.battery_level, Some(42));
        assert_eq!(patch.last_maintenance, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(patch.assigned_task.as_deref(), Some("Inventory"));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn test_collects_every_invalid_field() {
        let errors = UnitPatch::from_fields(&fields(json!({
            "status": "Unknown",
            "batteryLevel": 150,
            "name": "",
            "id": 7,
            "__proto__": {"admin": true}
        })))
        .unwrap_err();

        let by_field = errors.field_errors();
        for field in ["status", "batteryLevel", "name", "id", "unknown_field"] {
            assert!(by_field.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_battery_level_rejects_non_integers() {
        assert!(UnitPatch::from_fields(&fields(json!({ "batteryLevel": "full" }))).is_err());
        assert!(UnitPatch::from_fields(&fields(json!({ "batteryLevel": -1 }))).is_err());
        assert!(UnitPatch::from_fields(&fields(json!({ "batteryLevel": 99.5 }))).is_err());
    }

    #[test]
    fn test_empty_payload_is_noop() {
        assert_eq!(UnitPatch::from_fields(&FieldMap::new()).unwrap(), UnitPatch::default());
    }
}
