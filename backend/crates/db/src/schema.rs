use sqlx::PgPool;

use leanval_common::error::LeanvalResult;

use crate::db_err;

/// Idempotent DDL for every table the service owns. Applied at startup and
/// by DB-backed tests.
const STATEMENTS: &[&str] = &[
    "create table if not exists projects (
      id uuid primary key,
      owner_id uuid not null,
      name text not null,
      description text,
      stage text not null default 'problem-validation',
      created_at timestamptz not null default now(),
      updated_at timestamptz not null default now()
    )",
    "create index if not exists projects_owner_idx on projects(owner_id)",
    "create table if not exists metrics (
      id uuid primary key,
      project_id uuid not null references projects(id) on delete cascade,
      name text not null,
      category text not null,
      current text,
      target text not null,
      warning_threshold text,
      error_threshold text,
      status text not null default 'not-started',
      created_at timestamptz not null default now(),
      updated_at timestamptz not null default now()
    )",
    "create index if not exists metrics_project_idx on metrics(project_id)",
    "create table if not exists growth_models (
      id uuid primary key,
      project_id uuid not null references projects(id) on delete cascade,
      name text not null,
      framework text not null,
      description text,
      created_at timestamptz not null default now(),
      updated_at timestamptz not null default now()
    )",
    "create index if not exists growth_models_project_idx on growth_models(project_id)",
    "create table if not exists growth_metrics (
      id uuid primary key,
      growth_model_id uuid not null references growth_models(id) on delete cascade,
      name text not null,
      category text not null,
      kind text not null default 'other',
      current_value double precision not null default 0,
      target_value double precision not null default 0,
      unit text not null,
      status text not null default 'off-track',
      created_at timestamptz not null default now(),
      updated_at timestamptz not null default now()
    )",
    "create index if not exists growth_metrics_model_idx on growth_metrics(growth_model_id)",
    "create table if not exists scaling_readiness_metrics (
      id uuid primary key,
      project_id uuid not null references projects(id) on delete cascade,
      growth_metric_id uuid references growth_metrics(id) on delete set null,
      name text not null,
      category text not null,
      current_value double precision not null default 0,
      target_value double precision not null default 0,
      unit text not null,
      status text not null default 'in-progress',
      created_at timestamptz not null default now(),
      updated_at timestamptz not null default now()
    )",
    "create index if not exists scaling_metrics_project_idx on scaling_readiness_metrics(project_id)",
];

pub async fn ensure_schema(pool: &PgPool) -> LeanvalResult<()> {
    for stmt in STATEMENTS {
        sqlx::query(stmt).execute(pool).await.map_err(db_err)?;
    }
    tracing::debug!(statements = STATEMENTS.len(), "schema ensured");
    Ok(())
}
