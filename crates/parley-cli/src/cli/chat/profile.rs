//! Profile collection before the session opens.

use dialoguer::Input;

use parley_types::profile::Profile;

/// Build a [`Profile`], prompting for any field not supplied on the command
/// line. Prompts re-ask until the value passes validation.
pub fn collect_profile(
    age: Option<u32>,
    hobby: Option<&str>,
    other: Option<&str>,
) -> anyhow::Result<Profile> {
    let age = match age {
        Some(age) => age,
        None => Input::<u32>::new()
            .with_prompt("  Your age")
            .validate_with(|age: &u32| -> Result<(), &str> {
                if *age == 0 {
                    Err("age must be a positive integer")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let hobby = match hobby {
        Some(hobby) => hobby.to_string(),
        None => Input::<String>::new()
            .with_prompt("  Your hobby")
            .validate_with(|hobby: &String| -> Result<(), &str> {
                if hobby.trim().is_empty() {
                    Err("hobby is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let other = match other {
        Some(other) => other.to_string(),
        None => Input::<String>::new()
            .with_prompt("  Anything else? (optional)")
            .allow_empty(true)
            .interact_text()?,
    };

    Ok(Profile::new(age, hobby, other)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_skip_prompts() {
        let profile = collect_profile(Some(34), Some(" climbing "), Some("")).unwrap();
        assert_eq!(profile.age(), 34);
        assert_eq!(profile.hobby(), "climbing");
        assert_eq!(profile.other(), "");
    }

    #[test]
    fn test_invalid_flag_values_are_rejected() {
        let err = collect_profile(Some(0), Some("chess"), Some("")).unwrap_err();
        assert!(err.to_string().contains("age"));

        let err = collect_profile(Some(20), Some("   "), Some("")).unwrap_err();
        assert!(err.to_string().contains("hobby"));
    }
}
