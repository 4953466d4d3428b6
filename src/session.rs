//! Who is looking at the dashboard.
//!
//! A `Session` is an explicit value handed to the presentation layer. None of
//! the aggregation or matching functions take one.

use serde::Serialize;

use crate::models::StudentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Staff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

impl Session {
    pub fn can_view_dashboard(&self) -> bool {
        self.role == Role::Staff
    }

    /// Staff can see anyone; a student only their own record.
    pub fn can_view_student(&self, student_id: &str) -> bool {
        match self.role {
            Role::Staff => true,
            Role::Student => self.student_id.as_deref() == Some(student_id),
        }
    }

    pub fn student<'a>(&self, students: &'a [StudentRecord]) -> Option<&'a StudentRecord> {
        let id = self.student_id.as_deref()?;
        students.iter().find(|student| student.id == id)
    }
}

/// Credentials accepted by `AccessPolicy::login`.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    pub staff_username: String,
    pub staff_password: String,
    pub student_password: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            staff_username: "admin".to_string(),
            staff_password: "admin123".to_string(),
            student_password: "123456".to_string(),
        }
    }
}

impl AccessPolicy {
    /// Staff sign in with the staff account; students with their first and
    /// last name run together (case and whitespace ignored).
    pub fn login(&self, username: &str, password: &str, students: &[StudentRecord]) -> Option<Session> {
        if username.eq_ignore_ascii_case(&self.staff_username) && password == self.staff_password {
            return Some(Session {
                user_id: "staff-1".to_string(),
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: "admin@example.com".to_string(),
                role: Role::Staff,
                student_id: None,
            });
        }

        let wanted = username_key(username);
        let student = students
            .iter()
            .find(|student| username_key(&format!("{}{}", student.first_name, student.last_name)) == wanted)?;

        if password != self.student_password {
            return None;
        }

        Some(Session {
            user_id: format!("student-{}", student.id),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            role: Role::Student,
            student_id: Some(student.id.clone()),
        })
    }
}

fn username_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<StudentRecord> {
        vec![
            StudentRecord {
                id: "1".to_string(),
                first_name: "Mary Ann".to_string(),
                last_name: "Lee".to_string(),
                email: "mal@x.com".to_string(),
                ..StudentRecord::default()
            },
            StudentRecord {
                id: "2".to_string(),
                first_name: "Omar".to_string(),
                last_name: "Haddad".to_string(),
                ..StudentRecord::default()
            },
        ]
    }

    #[test]
    fn staff_login() {
        let session = AccessPolicy::default().login("Admin", "admin123", &[]).unwrap();
        assert_eq!(session.role, Role::Staff);
        assert!(session.can_view_dashboard());
        assert!(session.can_view_student("2"));
    }

    #[test]
    fn student_login_ignores_case_and_spaces() {
        let students = roster();
        let session = AccessPolicy::default()
            .login("MaryAnn Lee", "123456", &students)
            .unwrap();

        assert_eq!(session.role, Role::Student);
        assert_eq!(session.user_id, "student-1");
        assert_eq!(session.student_id.as_deref(), Some("1"));
        assert!(!session.can_view_dashboard());
        assert!(session.can_view_student("1"));
        assert!(!session.can_view_student("2"));
        assert_eq!(session.student(&students).map(|s| s.email.as_str()), Some("mal@x.com"));
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        let students = roster();
        let policy = AccessPolicy::default();
        assert!(policy.login("omarhaddad", "wrong", &students).is_none());
        assert!(policy.login("nobody", "123456", &students).is_none());
        assert!(policy.login("admin", "123456", &students).is_none());
    }
}
