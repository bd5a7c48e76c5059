//! Services handling employee administration workflows.

use serde::Serialize;

use crate::domain::access::Area;
use crate::domain::employee::{Employee, EmployeeStats, EmployeeStatus, NewEmployee};
use crate::domain::types::EmailAddress;
use crate::domain::user::{NameParts, SessionUser};
use crate::forms::employees::{
    AddEmployeeForm, DeleteEmployeeForm, EmployeeListQuery, ToggleEmployeeForm,
    ToggleEmployeePayload,
};
use crate::repository::{EmployeeReader, EmployeeWriter};
use crate::services::{ServiceError, ServiceResult, ensure_access, repository_to_form};

/// Data required to render the employees page.
#[derive(Debug, Serialize)]
pub struct EmployeesPageData {
    pub employees: Vec<Employee>,
    pub stats: EmployeeStats,
    pub search: String,
    /// Only admins see the add, toggle and delete controls.
    pub can_manage: bool,
}

pub async fn load_employees_page<R>(
    repo: &R,
    user: &SessionUser,
    query: &EmployeeListQuery,
) -> ServiceResult<EmployeesPageData>
where
    R: EmployeeReader + ?Sized,
{
    ensure_access(user, Area::Staff)?;

    let employees = repo.list_employees(user.bearer()).await.map_err(|err| {
        log::error!("Failed to list employees: {err}");
        err
    })?;

    let search = query.search.as_deref().unwrap_or_default().trim().to_string();
    let stats = EmployeeStats::from_employees(&employees);
    let employees = employees
        .into_iter()
        .filter(|employee| employee.matches_search(&search))
        .collect();

    Ok(EmployeesPageData {
        employees,
        stats,
        search,
        can_manage: user.is_admin(),
    })
}

/// Validates the form and registers the account. Returns the new
/// employee's display name.
pub async fn add_employee<R>(
    repo: &R,
    user: &SessionUser,
    form: AddEmployeeForm,
) -> ServiceResult<String>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_access(user, Area::AdminOnly)?;

    let employee = NewEmployee::try_from(form)?;
    repo.register_employee(user.bearer(), &employee)
        .await
        .map_err(repository_to_form)?;

    let name = NameParts {
        first_name: employee.first_name.as_str().to_string(),
        second_name: employee.second_name.as_deref().map(str::to_string),
        first_last_name: employee.first_last_name.as_str().to_string(),
        second_last_name: employee.second_last_name.as_deref().map(str::to_string),
    }
    .full_name();
    log::info!(
        "{} registered {} as {:?}",
        user.email,
        employee.email,
        employee.role
    );
    Ok(name)
}

fn ensure_not_self(user: &SessionUser, email: &EmailAddress) -> ServiceResult<()> {
    if user.email.eq_ignore_ascii_case(email.as_str()) {
        return Err(ServiceError::Form(
            "No puedes modificar tu propia cuenta".to_string(),
        ));
    }
    Ok(())
}

/// Flips an account between active and inactive; returns the new status.
pub async fn toggle_employee<R>(
    repo: &R,
    user: &SessionUser,
    form: ToggleEmployeeForm,
) -> ServiceResult<EmployeeStatus>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_access(user, Area::AdminOnly)?;

    let payload = ToggleEmployeePayload::try_from(form)?;
    ensure_not_self(user, &payload.email)?;

    repo.update_employee_status(user.bearer(), &payload.email, payload.new_status)
        .await
        .map_err(repository_to_form)?;
    log::info!(
        "{} set {} to {}",
        user.email,
        payload.email,
        payload.new_status.as_str()
    );
    Ok(payload.new_status)
}

pub async fn delete_employee<R>(
    repo: &R,
    user: &SessionUser,
    form: DeleteEmployeeForm,
) -> ServiceResult<()>
where
    R: EmployeeWriter + ?Sized,
{
    ensure_access(user, Area::AdminOnly)?;

    let email = EmailAddress::try_from(form)?;
    ensure_not_self(user, &email)?;

    repo.delete_employee(user.bearer(), &email)
        .await
        .map_err(repository_to_form)?;
    log::info!("{} deleted {}", user.email, email);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    fn staff() -> Vec<Employee> {
        vec![
            Employee {
                name: "Administrador".to_string(),
                email: "admin@nicaflex.com".to_string(),
                role: Role::Admin,
                department: "Gerencia".to_string(),
                ..Employee::default()
            },
            Employee {
                name: "Roberto Sánchez".to_string(),
                email: "roberto.sanchez@nicaflex.com".to_string(),
                role: Role::Courier,
                department: "Aduanas".to_string(),
                status: EmployeeStatus::Inactive,
                ..Employee::default()
            },
        ]
    }

    fn add_form(role: &str) -> AddEmployeeForm {
        AddEmployeeForm {
            first_name: "Laura".to_string(),
            second_name: String::new(),
            first_last_name: "Pérez".to_string(),
            second_last_name: "Ruiz".to_string(),
            email: "laura@nicaflex.com".to_string(),
            phone: "88883333".to_string(),
            password: "secreto".to_string(),
            role: role.to_string(),
            department: String::new(),
        }
    }

    #[actix_web::test]
    async fn managers_see_list_without_controls() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees().returning(|_| Ok(staff()));

        let query = EmployeeListQuery {
            search: Some("ADUANAS".to_string()),
        };
        let data = load_employees_page(&repo, &user(Role::Manager), &query)
            .await
            .unwrap();
        assert!(!data.can_manage);
        assert_eq!(data.stats.total, 2);
        assert_eq!(data.stats.inactive, 1);
        assert_eq!(data.employees.len(), 1);
        assert_eq!(data.employees[0].name, "Roberto Sánchez");
    }

    #[actix_web::test]
    async fn only_admins_add_employees() {
        let mut repo = MockRepository::new();
        repo.expect_register_employee().times(0);

        let result = add_employee(&repo, &user(Role::Manager), add_form("mensajero")).await;
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[actix_web::test]
    async fn admin_adds_employee_with_backend_role_name() {
        let mut repo = MockRepository::new();
        repo.expect_register_employee()
            .withf(|token, employee| token == "token" && employee.role == Role::Manager)
            .times(1)
            .returning(|_, _| Ok(()));

        let name = add_employee(&repo, &user(Role::Admin), add_form("gerente"))
            .await
            .unwrap();
        assert_eq!(name, "Laura Pérez Ruiz");
    }

    #[actix_web::test]
    async fn toggle_sends_opposite_status() {
        let mut repo = MockRepository::new();
        repo.expect_update_employee_status()
            .withf(|_, email, status| {
                email.as_str() == "roberto.sanchez@nicaflex.com" && *status == EmployeeStatus::Active
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let status = toggle_employee(
            &repo,
            &user(Role::Admin),
            ToggleEmployeeForm {
                email: "roberto.sanchez@nicaflex.com".to_string(),
                status: "inactive".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(status, EmployeeStatus::Active);
    }

    #[actix_web::test]
    async fn admins_cannot_delete_themselves() {
        let mut repo = MockRepository::new();
        repo.expect_delete_employee().times(0);

        let admin = user(Role::Admin);
        let result = delete_employee(
            &repo,
            &admin,
            DeleteEmployeeForm {
                email: admin.email.clone(),
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
