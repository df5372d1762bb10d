//! `seed`: insert the fixed sample users and their role profiles.
//!
//! All four users go in a single transaction. Inserts use
//! `ON CONFLICT (username) DO NOTHING RETURNING id`, so a second run skips
//! existing users entirely — when no id comes back, no profile row is
//! written either. Plaintext credentials are printed on success; this is a
//! development seeding tool, never pointed at production data.

use std::fmt;

use sqlx::{Connection, PgConnection};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::password;

const PLACEHOLDER_PHONE: &str = "+1234567890";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Customer,
    Vendor,
    Driver,
    Admin,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Vendor => "vendor",
            Role::Driver => "driver",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SAMPLE_USERS: [(&str, &str, &str, Role); 4] = [
    ("customer1", "customer1@example.com", "password123", Role::Customer),
    ("vendor1", "vendor1@example.com", "password123", Role::Vendor),
    ("driver1", "driver1@example.com", "password123", Role::Driver),
    ("admin1", "admin1@example.com", "password123", Role::Admin),
];

pub async fn run(config: &Config) -> Result<()> {
    println!("\n=== Seeding Database ===");

    let mut conn = db::connect(&config.database_url).await?;
    let result = execute(&mut conn).await;
    db::close(conn).await;
    result
}

async fn execute(conn: &mut PgConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    println!("\nCreating sample users...");
    for (username, email, plaintext, role) in SAMPLE_USERS {
        let password_hash = password::hash_password(plaintext)?;

        let user_id: Option<i32> = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash, user_type) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (username) DO NOTHING \
             RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(role.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        // Conflict-skip: the user already exists, so no profile row either.
        let Some(user_id) = user_id else { continue };

        println!("  ✓ Created user: {username} ({role})");
        insert_profile(&mut tx, user_id, username, role).await?;
    }

    tx.commit().await?;

    println!("\n✓ Database seeded successfully");
    println!("\nSample credentials:");
    println!("  Username: customer1, Password: password123 (Customer)");
    println!("  Username: vendor1,   Password: password123 (Vendor)");
    println!("  Username: driver1,   Password: password123 (Driver)");
    println!("  Username: admin1,    Password: password123 (Admin)");
    Ok(())
}

async fn insert_profile(
    conn: &mut PgConnection,
    user_id: i32,
    username: &str,
    role: Role,
) -> Result<()> {
    match role {
        Role::Customer => {
            sqlx::query("INSERT INTO customers (user_id, full_name, phone) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(format!("Customer {username}"))
                .bind(PLACEHOLDER_PHONE)
                .execute(conn)
                .await?;
        }
        Role::Vendor => {
            sqlx::query(
                "INSERT INTO vendors (user_id, business_name, phone, city) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(format!("Business {username}"))
            .bind(PLACEHOLDER_PHONE)
            .bind("New York")
            .execute(conn)
            .await?;
        }
        Role::Driver => {
            sqlx::query(
                "INSERT INTO drivers (user_id, full_name, phone, vehicle_type) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(format!("Driver {username}"))
            .bind(PLACEHOLDER_PHONE)
            .bind("Car")
            .execute(conn)
            .await?;
        }
        Role::Admin => {
            sqlx::query("INSERT INTO admins (user_id, full_name, role) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(format!("Admin {username}"))
                .bind("System Administrator")
                .execute(conn)
                .await?;
        }
    }
    Ok(())
}
