//! Redondeo de salida y formateo de cifras

/// Redondear a `decimals` decimales (mitad lejos de cero)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Formatear una cifra sin ".0" superfluo: 30.0 -> "30", 27.5 -> "27.5"
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
