/// Renders a scaled quantity for display. Whole numbers render as plain
/// integer strings; anything else keeps exactly two comma-separated
/// decimals, so every formatted value re-parses to the same number through
/// `parser::decimales::parse_decimal`.
pub fn formater_quantite(valeur: f64) -> String {
    if valeur.fract() == 0.0 {
        format!("{}", valeur as i64)
    } else {
        format!("{:.2}", valeur).replace('.', ",")
    }
}
