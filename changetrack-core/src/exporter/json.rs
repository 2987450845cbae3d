//! JSON format exporter.

use crate::results::ChangeCalculatorResult;

/// Export a comparison outcome to JSON.
pub fn export(result: &ChangeCalculatorResult<'_>, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::calculate_changes;
    use crate::comparer::ComparerOptions;
    use crate::model::{DeclarationForest, FieldBuilder, Location, TypeBuilder};

    fn forests() -> (DeclarationForest, DeclarationForest) {
        let old = DeclarationForest::from_builders(vec![TypeBuilder::class("Account")
            .in_namespace("Bank")
            .modifiers(["public"])
            .located(Location::new("Account.cs", 3, 1))
            .field(FieldBuilder::new("decimal", "Balance").modifiers(["public"]))])
        .unwrap();
        let new = DeclarationForest::from_builders(vec![TypeBuilder::class("Account")
            .in_namespace("Bank")
            .modifiers(["public"])
            .located(Location::new("Account.cs", 3, 1))])
        .unwrap();
        (old, new)
    }

    #[test]
    fn test_export_json() {
        let (old, new) = forests();
        let result = calculate_changes(&old, &new, &ComparerOptions::default());

        let output = export(&result, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["change_type"], "Breaking");
        assert_eq!(value["summary"]["breaking"], 1);
        assert_eq!(value["results"][0]["old_item"]["full_name"], "Bank.Account.Balance");
        assert_eq!(value["results"][0]["old_item"]["definition_type"], "Field");
        assert!(value["results"][0]["new_item"].is_null());
        assert_eq!(
            value["results"][0]["arguments"]["message_format"],
            "{DefinitionType} {Identifier} has been removed"
        );
    }

    #[test]
    fn test_export_json_pretty() {
        let (old, _) = forests();
        let result = calculate_changes(&old, &old, &ComparerOptions::default());
        let output = export(&result, true).unwrap();
        assert!(output.contains('\n'));
        assert!(output.contains("\"change_type\": \"None\""));
    }
}
