//! The fixed list of pages that render inside the finance layout.

/// Finance pages that import and render their own `Navbar`/`Footer` even
/// though `app/finance/layout.tsx` already does.
///
/// Paths are relative to the workspace root and processed in this order.
pub const FINANCE_PAGES: &[&str] = &[
    "app/finance/roles/list/page.tsx",
    "app/finance/roles/add/page.tsx",
    "app/finance/products/list/page.tsx",
    "app/finance/products/add/page.tsx",
    "app/finance/payroll/pending/page.tsx",
    "app/finance/payroll/approved/page.tsx",
    "app/finance/employees/list/page.tsx",
    "app/finance/employees/add/page.tsx",
    "app/finance/orders/completed/page.tsx",
    "app/finance/orders/pending/page.tsx",
];
