//! Servo angle to PWM duty mapping

/// Map an angle in degrees (0..=180) onto the servo's duty range.
///
/// Linear: `duty = round(min + angle / 180 * (max - min))`.
pub fn angle_to_duty(angle: u16, duty_min: u16, duty_max: u16) -> u16 {
    let span = f32::from(duty_max) - f32::from(duty_min);
    (f32::from(duty_min) + (f32::from(angle) / 180.0) * span).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_angles_are_exact() {
        assert_eq!(angle_to_duty(0, 2000, 10_000), 2000);
        assert_eq!(angle_to_duty(180, 2000, 10_000), 10_000);
        assert_eq!(angle_to_duty(90, 2000, 10_000), 6000);
    }

    #[test]
    fn test_mapping_is_monotonic() {
        let mut last = 0;
        for angle in (0..=180).step_by(10) {
            let duty = angle_to_duty(angle, 2000, 10_000);
            assert!(duty >= last);
            last = duty;
        }
    }
}
