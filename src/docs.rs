use crate::api::admin::{UpdateManager, UpdateRole};
use crate::api::leave::{CreateLeave, DecisionReq};
use crate::api::reimbursement::CreateClaim;
use crate::model::claim::{ClaimCategory, ClaimRecord, ClaimReviewRow};
use crate::model::leave::{LeaveRecord, LeaveReviewRow, LeaveType};
use crate::model::role::Role;
use crate::model::user::DirectoryRow;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dayoff API",
        version = "1.0.0",
        description = r#"
## Leave & Reimbursement Approval Service

Employees submit leave requests and reimbursement claims; managers and
admins review them; admins pay out approved claims and maintain the
user directory.

### 🔹 Key Features
- **Leave Requests**
  - Submit, cancel, and track leave; managers approve or reject
- **Reimbursement Claims**
  - Submit expense claims; managers decide; admins mark them paid
- **Team Views**
  - Managers see their direct reports' requests, admins see everything
- **User Directory**
  - Admins assign roles and reporting managers

### 🔐 Security
Endpoints are protected using **JWT Bearer authentication**. Decisions
require the owner's manager or an Admin; payment and directory changes
are Admin-only.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave::create_leave,
        crate::api::leave::my_leaves,
        crate::api::leave::cancel_leave,
        crate::api::leave::team_leaves,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,

        crate::api::reimbursement::submit_claim,
        crate::api::reimbursement::my_claims,
        crate::api::reimbursement::cancel_claim,
        crate::api::reimbursement::team_claims,
        crate::api::reimbursement::approved_unpaid,
        crate::api::reimbursement::approve_claim,
        crate::api::reimbursement::reject_claim,
        crate::api::reimbursement::pay_claim,

        crate::api::admin::list_users,
        crate::api::admin::update_user_role,
        crate::api::admin::update_user_manager
    ),
    components(
        schemas(
            CreateLeave,
            DecisionReq,
            LeaveType,
            LeaveRecord,
            LeaveReviewRow,
            CreateClaim,
            ClaimCategory,
            ClaimRecord,
            ClaimReviewRow,
            Role,
            UpdateRole,
            UpdateManager,
            DirectoryRow
        )
    ),
    tags(
        (name = "Leave", description = "Leave request APIs"),
        (name = "Reimbursement", description = "Reimbursement claim APIs"),
        (name = "Admin", description = "User directory APIs"),
    )
)]
pub struct ApiDoc;
