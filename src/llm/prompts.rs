//! Extraction prompt construction. The prompt is driven by the variable
//! catalog so that deployments can ask for extra variables without code
//! changes, and embeds the JSON schema of the expected structured response.

use schemars::schema_for;

use crate::catalog::Catalog;
use crate::variables::FinancialVariable;

/// Builds the extraction instruction sent to the model for one rendered
/// document.
pub fn build_extraction_prompt(document_text: &str, catalog: &Catalog) -> String {
    let mut prompt = String::from("Voici un bilan comptable au format Markdown :\n\n");
    prompt.push_str(document_text);
    prompt.push_str("\n\n");

    if catalog.is_empty() {
        prompt.push_str(
            "Identifie et renvoie un objet JSON avec les principales variables \
             financières présentes (total de l'actif, total du passif, capitaux \
             propres, résultat net, chiffre d'affaires, dettes).\n",
        );
    } else {
        prompt.push_str(
            "Identifie et renvoie un objet JSON avec les variables suivantes si \
             elles sont présentes :\n",
        );
        for name in catalog.names() {
            prompt.push_str("- ");
            prompt.push_str(name);
            if let Some(info) = catalog.info(name) {
                if let Some(code) = &info.code {
                    prompt.push_str(&format!(" (code {})", code));
                }
                if let Some(description) = &info.description {
                    prompt.push_str(" : ");
                    prompt.push_str(description);
                }
            }
            prompt.push('\n');
        }
    }

    prompt.push_str(
        "\nPour chaque variable trouvée, renvoie une entrée de la forme :\n\
         \"nom_variable\": { \"values\": [ { \"value\": <nombre>, \
         \"value_type\": \"brut\" | \"amortissement\" | \"net\" | \"unspecified\", \
         \"year\": <année ou null> } ] }\n\
         Indique une valeur par colonne du bilan (brut, amortissement, net) et \
         par exercice.\n",
    );

    if let Some(schema) = variable_schema_json() {
        prompt.push_str("\nSchéma JSON de chaque entrée :\n");
        prompt.push_str(&schema);
        prompt.push('\n');
    }

    prompt.push_str("\nRéponds uniquement avec un objet JSON parsable, sans texte autour.");
    prompt
}

fn variable_schema_json() -> Option<String> {
    let schema = schema_for!(FinancialVariable);
    serde_json::to_string_pretty(&schema).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_catalog_variables() {
        let prompt = build_extraction_prompt("## Bilan", &Catalog::builtin());
        assert!(prompt.contains("## Bilan"));
        assert!(prompt.contains("- actif_total"));
        assert!(prompt.contains("- dettes"));
        assert!(prompt.contains("Total de l'actif"));
    }

    #[test]
    fn test_prompt_describes_structured_shape() {
        let prompt = build_extraction_prompt("doc", &Catalog::builtin());
        assert!(prompt.contains("value_type"));
        assert!(prompt.contains("\"brut\""));
        assert!(prompt.contains("JSON parsable"));
    }

    #[test]
    fn test_prompt_with_empty_catalog_still_asks_for_variables() {
        let prompt = build_extraction_prompt("doc", &Catalog::empty());
        assert!(prompt.contains("capitaux"));
        assert!(prompt.contains("JSON"));
    }
}
