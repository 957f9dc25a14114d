//! Interactive course selection

use crate::canvas::Course;
use crate::error::{Error, Result};
use dialoguer::Select;

/// Menu line for a course: `"\t{id}\t-\t{name}"`
pub fn course_label(course: &Course) -> String {
    format!("\t{}\t-\t{}", course.id, course.name)
}

/// Ask the user to pick one course; returns its index in `courses`
pub fn select_course(courses: &[Course]) -> Result<usize> {
    if courses.is_empty() {
        return Err(Error::config("No courses found for this token"));
    }

    let labels: Vec<String> = courses.iter().map(course_label).collect();
    let index = Select::new()
        .with_prompt("Select a course")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(index)
}

/// Course with the given id
pub fn find_course(courses: &[Course], id: u64) -> Result<&Course> {
    courses
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| Error::config(format!("Course {id} is not among your courses")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, name: &str) -> Course {
        serde_json::from_value(serde_json::json!({"id": id, "name": name})).unwrap()
    }

    #[test]
    fn test_course_label() {
        assert_eq!(course_label(&course(1234, "Intro to Rust")), "\t1234\t-\tIntro to Rust");
    }

    #[test]
    fn test_find_course() {
        let courses = vec![course(1, "A"), course(2, "B")];
        assert_eq!(find_course(&courses, 2).unwrap().name, "B");

        let err = find_course(&courses, 3).unwrap_err();
        assert!(err.to_string().contains("Course 3"));
    }

    #[test]
    fn test_select_course_empty() {
        let err = select_course(&[]).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
