//! # Action List Module
//!
//! Builds the ordered list of buttons shown with triage results: call actions,
//! map routes and a taxi link. Calls are deferred because Telegram inline
//! buttons cannot dial; selecting one makes the bot send the number as text.

use serde::{Deserialize, Serialize};

use crate::resources::TownResources;

pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1";
pub const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";
pub const TAXI_URL: &str = "https://bolt.eu/";

/// Latitude/longitude pair from a location share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walking,
    Transit,
    Driving,
}

impl TravelMode {
    pub fn as_query(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
            TravelMode::Driving => "driving",
        }
    }
}

/// Phone contact a deferred call button refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget {
    Emergency,
    Clinic,
    DutyDoctor,
}

impl CallTarget {
    pub fn callback_data(self) -> &'static str {
        match self {
            CallTarget::Emergency => "call:113",
            CallTarget::Clinic => "call:clinic",
            CallTarget::DutyDoctor => "call:duty",
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "call:113" => Some(CallTarget::Emergency),
            "call:clinic" => Some(CallTarget::Clinic),
            "call:duty" => Some(CallTarget::DutyDoctor),
            _ => None,
        }
    }
}

/// What a button does; the UI layer turns this into a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    EmergencyCall,
    ClinicCall,
    DutyDoctorCall,
    Route(TravelMode),
    MapSearch,
    Taxi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    Url(String),
    Deferred(CallTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub kind: ActionKind,
    pub target: ActionTarget,
}

impl ActionButton {
    fn link(kind: ActionKind, url: String) -> Self {
        Self {
            kind,
            target: ActionTarget::Url(url),
        }
    }

    fn call(kind: ActionKind, target: CallTarget) -> Self {
        Self {
            kind,
            target: ActionTarget::Deferred(target),
        }
    }
}

/// Destination query for map links: hospital name and address, spaces as `+`
pub fn destination_query(resources: &TownResources) -> String {
    format!("{} {}", resources.hospital.name, resources.hospital.address).replace(' ', "+")
}

pub fn map_search_url(resources: &TownResources) -> String {
    format!("{}&query={}", MAPS_SEARCH_URL, destination_query(resources))
}

pub fn route_url(resources: &TownResources, origin: Coordinates, mode: TravelMode) -> String {
    format!(
        "{}&origin={},{}&destination={}&travelmode={}",
        MAPS_DIRECTIONS_URL,
        origin.latitude,
        origin.longitude,
        destination_query(resources),
        mode.as_query()
    )
}

/// Build the ordered action list for a results message
///
/// Severe cases get fewer choices: emergency, clinic, one driving route, taxi.
/// Buttons for unconfigured phone numbers are left out.
pub fn build_actions(
    resources: &TownResources,
    severe: bool,
    coordinates: Option<Coordinates>,
) -> Vec<ActionButton> {
    let mut actions = Vec::new();

    if severe {
        if resources.emergency_phone().is_some() {
            actions.push(ActionButton::call(
                ActionKind::EmergencyCall,
                CallTarget::Emergency,
            ));
        }
    } else if resources.duty_phone().is_some() {
        actions.push(ActionButton::call(
            ActionKind::DutyDoctorCall,
            CallTarget::DutyDoctor,
        ));
    }

    if resources.hospital_phone().is_some() {
        actions.push(ActionButton::call(ActionKind::ClinicCall, CallTarget::Clinic));
    }

    let modes: &[TravelMode] = if severe {
        &[TravelMode::Driving]
    } else {
        &[TravelMode::Walking, TravelMode::Transit, TravelMode::Driving]
    };

    match coordinates {
        Some(origin) => {
            for &mode in modes {
                actions.push(ActionButton::link(
                    ActionKind::Route(mode),
                    route_url(resources, origin, mode),
                ));
            }
        }
        None => actions.push(ActionButton::link(
            ActionKind::MapSearch,
            map_search_url(resources),
        )),
    }

    actions.push(ActionButton::link(ActionKind::Taxi, TAXI_URL.to_string()));

    actions
}

/// Display name and number behind a deferred call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallContact {
    Emergency { phone: String },
    Named { name: String, phone: String },
}

/// Resolve a deferred call into something to show the user
///
/// Returns `None` when the number is not configured.
pub fn resolve_call(resources: &TownResources, target: CallTarget) -> Option<CallContact> {
    match target {
        CallTarget::Emergency => resources.emergency_phone().map(|phone| CallContact::Emergency {
            phone: phone.to_string(),
        }),
        CallTarget::Clinic => resources.hospital_phone().map(|phone| CallContact::Named {
            name: resources.hospital.name.clone(),
            phone: phone.to_string(),
        }),
        CallTarget::DutyDoctor => {
            let doctor = resources.duty_doctor.as_ref()?;
            resources.duty_phone().map(|phone| CallContact::Named {
                name: doctor.name.clone(),
                phone: phone.to_string(),
            })
        }
    }
}
