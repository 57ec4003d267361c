pub mod dashboard_por;
