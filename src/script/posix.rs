use super::template::Dialect;

pub(super) static DIALECT: Dialect = Dialect {
    opening: "#!/bin/bash\n\n",
    comment: "#",
    escape,
    boolean,
    variables: VARIABLES,
    prelude: PRELUDE,
    procedures: PROCEDURES,
    record: RECORD,
    footer: FOOTER,
};

/// Escapes a value for a double-quoted bash string.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn boolean(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

const VARIABLES: &str = r#"CLOUDFLARE_API_TOKEN="{token}"
ZONE_ID="{zone_id}"
"#;

const PRELUDE: &str = r#"# Set command paths
CURL=$(command -v curl)
JQ=$(command -v jq)

# Check dependencies
if [ -z "$CURL" ]; then
    echo "Error: curl not found. Please install curl."
    exit 1
fi

if [ -z "$JQ" ]; then
    echo "Error: jq not found. Please install jq."
    exit 1
fi

# Get current public IP
IP=$($CURL -s {ip_endpoint} | tr -d '[:space:]')
if [ -z "$IP" ]; then
    echo "Error: Could not get public IP"
    exit 1
fi

echo "Current IP: $IP"
echo "Starting DNS updates..."
"#;

const PROCEDURES: &str = r#"
# Function to get DNS record ID
get_dns_record_id() {
    local name="$1"
    $CURL -s -X GET "{api_base}/zones/$ZONE_ID/dns_records?name=$name" -H "Authorization: Bearer $CLOUDFLARE_API_TOKEN" -H "Content-Type: application/json" | $JQ -r ".result[0].id // null"
}

# Function to get current DNS record IP
get_current_ip() {
    local id="$1"
    $CURL -s -X GET "{api_base}/zones/$ZONE_ID/dns_records/$id" -H "Authorization: Bearer $CLOUDFLARE_API_TOKEN" -H "Content-Type: application/json" | $JQ -r ".result.content // empty"
}

# Function to update DNS record
update_dns_record() {
    local id="$1"
    local name="$2"
    local type="$3"
    local proxied="$4"
    local response
    response=$($CURL -s -X PUT "{api_base}/zones/$ZONE_ID/dns_records/$id" -H "Authorization: Bearer $CLOUDFLARE_API_TOKEN" -H "Content-Type: application/json" --data "{\"type\":\"$type\",\"name\":\"$name\",\"content\":\"$IP\",\"ttl\":1,\"proxied\":$proxied}")
    local success
    success=$(echo "$response" | $JQ -r ".success // false")
    if [ "$success" = "true" ]; then
        echo "✓ Updated $name to $IP"
    else
        local error
        error=$(echo "$response" | $JQ -r ".errors[0].message // \"Unknown error\"")
        echo "✗ Failed to update $name: $error"
    fi
}
"#;

const RECORD: &str = r#"# Record {n}: {name}
echo "Updating {name}..."
RECORD_ID_{n}=$(get_dns_record_id "{name}")
if [ "$RECORD_ID_{n}" != "null" ] && [ -n "$RECORD_ID_{n}" ]; then
    CURRENT_IP_{n}=$(get_current_ip "$RECORD_ID_{n}")
    if [ "$IP" != "$CURRENT_IP_{n}" ]; then
        update_dns_record "$RECORD_ID_{n}" "{name}" "{type}" {proxied}
    else
        echo "→ {name} already has IP $IP"
    fi
else
    echo "✗ DNS record not found: {name}"
fi
"#;

const FOOTER: &str = r#"
echo "DNS update completed!"
"#;
