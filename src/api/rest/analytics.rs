use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/analytics/financial", get(financial_report))
}

#[derive(Serialize)]
pub struct VehicleAnalytics {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub total_cost: f64,
    pub revenue: f64,
    pub roi: f64,
    pub fuel_efficiency: f64,
    pub total_liters: f64,
}

#[derive(Serialize)]
pub struct FinancialSummary {
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_operational_cost: f64,
    pub total_revenue: f64,
    pub avg_cost_per_vehicle: f64,
    pub net_profit: f64,
}

#[derive(Serialize)]
pub struct FinancialReport {
    pub summary: FinancialSummary,
    pub vehicle_analytics: Vec<VehicleAnalytics>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

async fn financial_report(State(state): State<Arc<AppState>>) -> Json<FinancialReport> {
    let vehicles = state.store.list_vehicles();
    let fuel = state.store.list_fuel(None);
    let maintenance = state.store.list_maintenance(None);

    let vehicle_analytics: Vec<VehicleAnalytics> = vehicles
        .iter()
        .map(|v| {
            let fuel_cost: f64 = fuel
                .iter()
                .filter(|f| f.vehicle_id == v.id)
                .map(|f| f.cost)
                .sum();
            let total_liters: f64 = fuel
                .iter()
                .filter(|f| f.vehicle_id == v.id)
                .map(|f| f.liters)
                .sum();
            let maintenance_cost: f64 = maintenance
                .iter()
                .filter(|m| m.vehicle_id == v.id)
                .map(|m| m.cost)
                .sum();
            let total_cost = fuel_cost + maintenance_cost;

            let fuel_efficiency = if total_liters > 0.0 {
                round2(f64::from(v.odometer) / total_liters)
            } else {
                0.0
            };
            let roi = if v.acq_cost > 0.0 {
                round2((v.revenue - total_cost) / v.acq_cost * 100.0)
            } else {
                0.0
            };

            VehicleAnalytics {
                vehicle_id: v.id.clone(),
                vehicle_name: v.name.clone(),
                fuel_cost,
                maintenance_cost,
                total_cost,
                revenue: v.revenue,
                roi,
                fuel_efficiency,
                total_liters,
            }
        })
        .collect();

    let total_fuel_cost: f64 = fuel.iter().map(|f| f.cost).sum();
    let total_maintenance_cost: f64 = maintenance.iter().map(|m| m.cost).sum();
    let total_operational_cost = total_fuel_cost + total_maintenance_cost;
    let total_revenue: f64 = vehicles.iter().map(|v| v.revenue).sum();
    let avg_cost_per_vehicle = if vehicles.is_empty() {
        0.0
    } else {
        total_operational_cost / vehicles.len() as f64
    };

    Json(FinancialReport {
        summary: FinancialSummary {
            total_fuel_cost,
            total_maintenance_cost,
            total_operational_cost,
            total_revenue,
            avg_cost_per_vehicle,
            net_profit: total_revenue - total_operational_cost,
        },
        vehicle_analytics,
    })
}
