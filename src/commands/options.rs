use crate::args::OptionsArgs;
use crate::commands::Out;
use crate::i18n::Labels;
use crate::model::{vocab, RecordKind};
use crate::table::{FilterOption, TableConfig};
use crate::{Config, Result};
use serde::Serialize;

/// The selectable values of one filterable field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldOptions {
    pub field: String,
    pub options: Vec<FilterOption>,
}

/// Lists the values each filterable field of `kind` accepts, labeled in the chosen locale. Vehicle
/// brands come with their known models.
pub async fn options(config: Config, args: OptionsArgs) -> Result<Out<Vec<FieldOptions>>> {
    let labels = Labels::new(args.locale().unwrap_or_else(|| config.locale()));
    let table = TableConfig::for_kind(args.kind());

    let mut fields: Vec<FieldOptions> = table
        .filterable()
        .map(|field| FieldOptions {
            field: field.to_string(),
            options: table.filter_options(field, &labels),
        })
        .collect();
    if args.kind() == RecordKind::Vehicle {
        fields.push(FieldOptions {
            field: "brand".to_string(),
            options: vocab::brands()
                .map(|brand| FilterOption {
                    value: brand.to_string(),
                    label: format!("{brand} ({})", vocab::models_for(brand).join(", ")),
                })
                .collect(),
        });
    }

    let mut report = Vec::new();
    for field in &fields {
        report.push(format!("{}:", field.field));
        for option in &field.options {
            report.push(format!("  {} = {}", option.value, option.label));
        }
    }
    let message = format!(
        "{} filterable fields for {}",
        fields.len(),
        args.kind()
    );
    Ok(Out::new(message, fields).with_report(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_fuel_options_in_chinese() {
        let env = TestEnv::new().await;
        let out = options(env.config(), OptionsArgs::new(RecordKind::Fuel, Some(Locale::Zh)))
            .await
            .unwrap();
        let fields = out.structure().unwrap();
        let fuel_type = fields.iter().find(|f| f.field == "fuel_type").unwrap();
        assert!(fuel_type
            .options
            .iter()
            .any(|o| o.value == "diesel" && o.label == "柴油"));
        assert!(out.report().contains(&"  diesel = 柴油".to_string()));
    }

    #[tokio::test]
    async fn test_vehicle_brands() {
        let env = TestEnv::new().await;
        let out = options(env.config(), OptionsArgs::new(RecordKind::Vehicle, None))
            .await
            .unwrap();
        let fields = out.structure().unwrap();
        let brand = fields.iter().find(|f| f.field == "brand").unwrap();
        assert!(brand.options.iter().any(|o| o.label.contains("Camry")));
    }
}
