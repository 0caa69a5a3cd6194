use super::template::Dialect;

pub(super) static DIALECT: Dialect = Dialect {
    opening: "",
    comment: "#",
    escape,
    boolean,
    variables: VARIABLES,
    prelude: PRELUDE,
    procedures: PROCEDURES,
    record: RECORD,
    footer: FOOTER,
};

/// Backtick is PowerShell's escape character inside double-quoted strings.
fn escape(value: &str) -> String {
    value.replace('`', "``").replace('"', "`\"")
}

fn boolean(value: bool) -> &'static str {
    if value {
        "$true"
    } else {
        "$false"
    }
}

const VARIABLES: &str = r#"$CLOUDFLARE_API_TOKEN = "{token}"
$ZONE_ID = "{zone_id}"
"#;

const PRELUDE: &str = r#"# Get current public IP
$IP = $null
try {
    $IP = (Invoke-RestMethod -Uri "{ip_endpoint}").ToString().Trim()
} catch {
    Write-Error "Failed to get current IP address"
    exit 1
}
if ([string]::IsNullOrWhiteSpace($IP)) {
    Write-Error "Could not get public IP"
    exit 1
}

Write-Host "Current IP: $IP"
Write-Host "Starting DNS updates..."

# Headers for API requests
$headers = @{
    "Authorization" = "Bearer $CLOUDFLARE_API_TOKEN"
    "Content-Type" = "application/json"
}
"#;

const PROCEDURES: &str = r#"
# Function to get DNS record ID
function Get-DNSRecordID {
    param($recordName)
    try {
        $response = Invoke-RestMethod -Uri "{api_base}/zones/$ZONE_ID/dns_records?name=$recordName" -Headers $headers -Method Get
        if ($response.success -and $response.result.Count -gt 0) {
            return $response.result[0].id
        }
        return $null
    } catch {
        Write-Warning "Failed to get record ID for $recordName"
        return $null
    }
}

# Function to get current DNS record IP
function Get-CurrentIP {
    param($recordId)
    try {
        $response = Invoke-RestMethod -Uri "{api_base}/zones/$ZONE_ID/dns_records/$recordId" -Headers $headers -Method Get
        if ($response.success) {
            return $response.result.content
        }
        return $null
    } catch {
        Write-Warning "Failed to get current IP for record $recordId"
        return $null
    }
}

# Function to update DNS record
function Update-DNSRecord {
    param($recordId, $recordName, $recordType, $proxied)

    $body = @{
        type = $recordType
        name = $recordName
        content = $IP
        ttl = 1
        proxied = $proxied
    } | ConvertTo-Json

    try {
        $response = Invoke-RestMethod -Uri "{api_base}/zones/$ZONE_ID/dns_records/$recordId" -Headers $headers -Method Put -Body $body
        if ($response.success) {
            Write-Host "✓ Updated $recordName to $IP" -ForegroundColor Green
        } else {
            $message = "Unknown error"
            if ($response.errors -and $response.errors.Count -gt 0) {
                $message = $response.errors[0].message
            }
            Write-Warning "✗ Failed to update ${recordName}: $message"
        }
    } catch {
        $message = $_.Exception.Message
        if ($_.ErrorDetails -and $_.ErrorDetails.Message) {
            try {
                $details = $_.ErrorDetails.Message | ConvertFrom-Json
                if ($details.errors -and $details.errors.Count -gt 0) {
                    $message = $details.errors[0].message
                }
            } catch {
            }
        }
        Write-Warning "✗ Failed to update ${recordName}: $message"
    }
}
"#;

const RECORD: &str = r#"# Record {n}: {name}
Write-Host "Updating {name}..."
$recordId{n} = Get-DNSRecordID -recordName "{name}"
if ($recordId{n}) {
    $currentIP{n} = Get-CurrentIP -recordId $recordId{n}
    if ($IP -ne $currentIP{n}) {
        Update-DNSRecord -recordId $recordId{n} -recordName "{name}" -recordType "{type}" -proxied {proxied}
    } else {
        Write-Host "→ {name} already has IP $IP" -ForegroundColor Yellow
    }
} else {
    Write-Warning "✗ DNS record not found: {name}"
}
"#;

const FOOTER: &str = r#"
Write-Host "DNS update completed!" -ForegroundColor Green
"#;
